//! Summary statistics for a generated dataset.

use chrono::NaiveDate;

use crate::domain::{Category, City, SalesDataset};
use crate::error::AppError;
use crate::math::{argmax, category_totals, city_totals, mean, monthly_totals};

pub mod format;

pub use format::*;

/// The figures printed in the summary block, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub total_sales: CurrencyText,
    pub average_sale: CurrencyText,
    pub total_units: String,
    pub avg_rating: String,
    pub total_gst: CurrencyText,
    pub avg_profit_margin: String,
    pub best_category: Category,
    pub best_city: City,
    /// e.g. `"March 2024"`.
    pub best_month: String,
    pub total_transactions: String,
}

/// Compute the summary. Fails only for an empty dataset.
pub fn compute_summary(dataset: &SalesDataset) -> Result<SalesSummary, AppError> {
    if dataset.is_empty() {
        return Err(AppError::internal("Cannot summarise an empty dataset."));
    }

    let sales: Vec<f64> = dataset.iter().map(|r| r.sales_amount).collect();
    let ratings: Vec<f64> = dataset.iter().map(|r| r.customer_rating).collect();
    let margins: Vec<f64> = dataset.iter().map(|r| r.profit_margin).collect();
    let total_units: u64 = dataset.iter().map(|r| u64::from(r.units_sold)).sum();
    let total_gst: f64 = dataset.iter().map(|r| r.gst_amount).sum();

    let missing = || AppError::internal("Aggregation produced no groups.");

    let best_category = argmax(&category_totals(dataset)).ok_or_else(missing)?;
    let best_city = argmax(&city_totals(dataset)).ok_or_else(missing)?;
    let (year, month) = argmax(&monthly_totals(dataset)).ok_or_else(missing)?;
    let best_month = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::internal(format!("Invalid month key {year}-{month}.")))?
        .format("%B %Y")
        .to_string();

    let summary = SalesSummary {
        total_sales: format_currency(sales.iter().sum()),
        average_sale: format_currency(mean(&sales).ok_or_else(missing)?),
        total_units: format_count(total_units),
        avg_rating: format_rating(mean(&ratings).ok_or_else(missing)?),
        total_gst: format_currency(total_gst),
        avg_profit_margin: format_percent(mean(&margins).ok_or_else(missing)?),
        best_category,
        best_city,
        best_month,
        total_transactions: format_count(dataset.len() as u64),
    };

    for (field, value, reason) in summary.currency_fallbacks() {
        tracing::warn!(field, value, reason, "amount shown unformatted");
    }
    Ok(summary)
}

impl SalesSummary {
    /// Currency fields that fell back to the raw number, as
    /// `(label, value, reason)`.
    pub fn currency_fallbacks(&self) -> Vec<(&'static str, f64, &'static str)> {
        [
            ("Total Sales", &self.total_sales),
            ("Average Sale per Transaction", &self.average_sale),
            ("Total GST Collected", &self.total_gst),
        ]
        .into_iter()
        .filter_map(|(label, text)| match text {
            CurrencyText::Raw { value, reason } => Some((label, *value, *reason)),
            CurrencyText::Formatted(_) => None,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalesRecord;

    fn rec(date: (i32, u32, u32), category: Category, city: City, sales: f64) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category,
            city,
            sales_amount: sales,
            units_sold: 600,
            customer_rating: 4.5,
            profit_margin: 0.25,
            gst_amount: 1000.25,
        }
    }

    #[test]
    fn dominant_groups_are_selected() {
        let ds = SalesDataset::new(vec![
            rec((2023, 1, 5), Category::Books, City::Delhi, 2_000.0),
            rec((2023, 1, 6), Category::Clothing, City::Mumbai, 1_000.0),
            rec((2023, 2, 7), Category::Furniture, City::Chennai, 90_000.0),
            rec((2023, 3, 7), Category::Books, City::Delhi, 3_000.0),
        ]);

        let s = compute_summary(&ds).unwrap();
        assert_eq!(s.best_category, Category::Furniture);
        assert_eq!(s.best_city, City::Chennai);
        assert_eq!(s.best_month, "February 2023");
        assert_eq!(s.total_transactions, "4");
        assert_eq!(s.total_units, "2,400");
        assert_eq!(s.total_sales.to_string(), "₹96,000.00");
        assert_eq!(s.average_sale.to_string(), "₹24,000.00");
        assert_eq!(s.total_gst.to_string(), "₹4,001.00");
        assert_eq!(s.avg_rating, "4.50/5.0");
        assert_eq!(s.avg_profit_margin, "25.0%");
    }

    #[test]
    fn ties_go_to_first_group() {
        let ds = SalesDataset::new(vec![
            rec((2023, 1, 5), Category::Books, City::Pune, 500.0),
            rec((2023, 2, 5), Category::Clothing, City::Delhi, 500.0),
        ]);
        let s = compute_summary(&ds).unwrap();
        // Clothing precedes Books in the category set; Delhi precedes Pune.
        assert_eq!(s.best_category, Category::Clothing);
        assert_eq!(s.best_city, City::Delhi);
        assert_eq!(s.best_month, "January 2023");
    }

    #[test]
    fn summary_block_order() {
        let ds = SalesDataset::new(vec![rec((2023, 1, 5), Category::Books, City::Pune, 500.0)]);
        let text = format_summary(&compute_summary(&ds).unwrap());
        let labels: Vec<&str> = text
            .lines()
            .filter_map(|l| l.split_once(':').map(|(k, _)| k))
            .collect();
        assert_eq!(
            labels,
            vec![
                "Total Sales",
                "Average Sale per Transaction",
                "Total Units Sold",
                "Total GST Collected",
                "Average Customer Rating",
                "Average Profit Margin",
                "Best Performing Category",
                "Best Performing City",
                "Best Performing Month",
                "Total Number of Transactions",
            ]
        );
    }

    #[test]
    fn non_finite_sales_fall_back_to_raw() {
        let ds = SalesDataset::new(vec![
            rec((2023, 1, 5), Category::Books, City::Pune, f64::INFINITY),
            rec((2023, 1, 6), Category::Books, City::Pune, 500.0),
        ]);
        let s = compute_summary(&ds).unwrap();
        assert!(!s.total_sales.is_formatted());
        assert!(s.total_gst.is_formatted());

        let fallbacks = s.currency_fallbacks();
        let labels: Vec<&str> = fallbacks.iter().map(|(label, _, _)| *label).collect();
        assert_eq!(labels, vec!["Total Sales", "Average Sale per Transaction"]);
        assert!(fallbacks.iter().all(|(_, v, _)| v.is_infinite()));
    }

    #[test]
    fn formatted_summary_has_no_fallbacks() {
        let ds = SalesDataset::new(vec![rec((2023, 1, 5), Category::Books, City::Pune, 500.0)]);
        assert!(compute_summary(&ds).unwrap().currency_fallbacks().is_empty());
    }

    #[test]
    fn empty_dataset_is_an_error() {
        assert!(compute_summary(&SalesDataset::default()).is_err());
    }
}
