//! Shared domain types.
//!
//! A run works on exactly one entity, the `SalesRecord`. Records are generated
//! once, kept in a `SalesDataset` sorted by date, and only read afterwards.
//! Derived values (`day_of_week`, `month`) are computed from `date` on demand
//! instead of being stored as extra columns.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::plot::ChartTheme;

/// Product category of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Groceries,
    #[serde(rename = "Home Appliances")]
    HomeAppliances,
    #[serde(rename = "Mobile Phones")]
    MobilePhones,
    Furniture,
    Books,
    #[serde(rename = "Sports Equipment")]
    SportsEquipment,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Clothing,
        Category::Groceries,
        Category::HomeAppliances,
        Category::MobilePhones,
        Category::Furniture,
        Category::Books,
        Category::SportsEquipment,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Groceries => "Groceries",
            Category::HomeAppliances => "Home Appliances",
            Category::MobilePhones => "Mobile Phones",
            Category::Furniture => "Furniture",
            Category::Books => "Books",
            Category::SportsEquipment => "Sports Equipment",
        }
    }
}

/// City where a transaction happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum City {
    Mumbai,
    Delhi,
    Bangalore,
    Chennai,
    Kolkata,
    Hyderabad,
    Pune,
    Ahmedabad,
}

impl City {
    pub const ALL: [City; 8] = [
        City::Mumbai,
        City::Delhi,
        City::Bangalore,
        City::Chennai,
        City::Kolkata,
        City::Hyderabad,
        City::Pune,
        City::Ahmedabad,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            City::Mumbai => "Mumbai",
            City::Delhi => "Delhi",
            City::Bangalore => "Bangalore",
            City::Chennai => "Chennai",
            City::Kolkata => "Kolkata",
            City::Hyderabad => "Hyderabad",
            City::Pune => "Pune",
            City::Ahmedabad => "Ahmedabad",
        }
    }
}

/// One transaction.
///
/// Field order is the column order of the persisted CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Category")]
    pub category: Category,
    #[serde(rename = "City")]
    pub city: City,
    #[serde(rename = "Sales_Amount")]
    pub sales_amount: f64,
    #[serde(rename = "Units_Sold")]
    pub units_sold: u32,
    #[serde(rename = "Customer_Rating")]
    pub customer_rating: f64,
    #[serde(rename = "Profit_Margin")]
    pub profit_margin: f64,
    #[serde(rename = "GST_Amount")]
    pub gst_amount: f64,
}

impl SalesRecord {
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    /// `(year, month)` key, which sorts in calendar order.
    pub fn month_key(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }

    /// Month label such as `"March 2024"`.
    pub fn month_label(&self) -> String {
        self.date.format("%B %Y").to_string()
    }

    pub fn value(&self, column: NumericColumn) -> f64 {
        match column {
            NumericColumn::SalesAmount => self.sales_amount,
            NumericColumn::UnitsSold => f64::from(self.units_sold),
            NumericColumn::CustomerRating => self.customer_rating,
            NumericColumn::ProfitMargin => self.profit_margin,
            NumericColumn::GstAmount => self.gst_amount,
        }
    }
}

/// The numeric columns of a record, in CSV order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    SalesAmount,
    UnitsSold,
    CustomerRating,
    ProfitMargin,
    GstAmount,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 5] = [
        NumericColumn::SalesAmount,
        NumericColumn::UnitsSold,
        NumericColumn::CustomerRating,
        NumericColumn::ProfitMargin,
        NumericColumn::GstAmount,
    ];

    pub fn header(self) -> &'static str {
        match self {
            NumericColumn::SalesAmount => "Sales_Amount",
            NumericColumn::UnitsSold => "Units_Sold",
            NumericColumn::CustomerRating => "Customer_Rating",
            NumericColumn::ProfitMargin => "Profit_Margin",
            NumericColumn::GstAmount => "GST_Amount",
        }
    }
}

/// Header row of the persisted CSV.
pub const CSV_HEADER: [&str; 8] = [
    "Date",
    "Category",
    "City",
    "Sales_Amount",
    "Units_Sold",
    "Customer_Rating",
    "Profit_Margin",
    "GST_Amount",
];

/// An ordered, read-only collection of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

impl SalesDataset {
    /// Build a dataset, sorting records by date (stable, ascending).
    pub fn new(mut records: Vec<SalesRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SalesRecord> {
        self.records.iter()
    }

    pub fn column(&self, column: NumericColumn) -> Vec<f64> {
        self.records.iter().map(|r| r.value(column)).collect()
    }

    /// First and last year covered, if any records exist.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.records.first()?.date.year();
        let last = self.records.last()?.date.year();
        Some((first, last))
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub count: usize,
    pub seed: u64,
    /// Separate seed for `category`/`city` draws. `None` means every draw comes
    /// from the single generator seeded with `seed`.
    pub categorical_seed: Option<u64>,
    pub csv_path: PathBuf,
    pub out_dir: PathBuf,
    pub chart: ChartTheme,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            seed: 42,
            categorical_seed: None,
            csv_path: PathBuf::from("indian_sales_data.csv"),
            out_dir: PathBuf::from("indian_sales_plots"),
            chart: ChartTheme::default(),
        }
    }
}
