//! Synthetic sales dataset generation.
//!
//! Dates are not random: record `i` falls on `EPOCH + i` days, so the date
//! column is a contiguous run with no gaps or repeats. Every other column is
//! drawn from an explicitly seeded `StdRng`, column by column.

use chrono::{Days, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Uniform;

use crate::domain::{Category, City, SalesDataset, SalesRecord};
use crate::error::AppError;

/// First calendar day of every generated dataset.
pub const EPOCH: (i32, u32, u32) = (2023, 1, 1);

pub const SALES_RANGE: (f64, f64) = (1_000.0, 100_000.0);
/// Half-open, so units fall in `1..=49`.
pub const UNITS_RANGE: (u32, u32) = (1, 50);
pub const RATING_RANGE: (f64, f64) = (3.0, 5.0);
pub const MARGIN_RANGE: (f64, f64) = (0.1, 0.4);
pub const GST_RANGE: (f64, f64) = (100.0, 10_000.0);

pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(EPOCH.0, EPOCH.1, EPOCH.2).unwrap_or(NaiveDate::MIN)
}

/// Generate `count` records.
///
/// With `categorical_seed == None` a single generator seeded by `seed` feeds
/// every draw: the category and city columns first, then the numeric columns.
/// With `Some(s)`, category and city come from a second generator seeded by
/// `s` while the numeric columns keep the `seed` stream, so numeric output is
/// the same whichever categorical seed is chosen.
pub fn generate_sales(
    count: usize,
    seed: u64,
    categorical_seed: Option<u64>,
) -> Result<SalesDataset, AppError> {
    if count == 0 {
        return Err(AppError::input("Record count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut categorical_rng = categorical_seed.map(StdRng::seed_from_u64);

    let dates = date_column(count)?;

    let (categories, cities) = {
        let r: &mut StdRng = match categorical_rng.as_mut() {
            Some(r) => r,
            None => &mut rng,
        };
        let categories: Vec<Category> = (0..count)
            .map(|_| Category::ALL[r.gen_range(0..Category::ALL.len())])
            .collect();
        let cities: Vec<City> = (0..count)
            .map(|_| City::ALL[r.gen_range(0..City::ALL.len())])
            .collect();
        (categories, cities)
    };

    let sales = uniform_column(&mut rng, SALES_RANGE, 2, count);
    let units: Vec<u32> = (0..count)
        .map(|_| rng.gen_range(UNITS_RANGE.0..UNITS_RANGE.1))
        .collect();
    let ratings = uniform_column(&mut rng, RATING_RANGE, 1, count);
    let margins = uniform_column(&mut rng, MARGIN_RANGE, 3, count);
    let gst = uniform_column(&mut rng, GST_RANGE, 2, count);

    let records = (0..count)
        .map(|i| SalesRecord {
            date: dates[i],
            category: categories[i],
            city: cities[i],
            sales_amount: sales[i],
            units_sold: units[i],
            customer_rating: ratings[i],
            profit_margin: margins[i],
            gst_amount: gst[i],
        })
        .collect();

    tracing::debug!(count, seed, ?categorical_seed, "generated sales records");

    // Dates are already ascending; `new` still sorts so ordering never depends
    // on how the rows were produced.
    Ok(SalesDataset::new(records))
}

fn date_column(count: usize) -> Result<Vec<NaiveDate>, AppError> {
    let start = epoch();
    (0..count as u64)
        .map(|i| {
            start
                .checked_add_days(Days::new(i))
                .ok_or_else(|| AppError::input(format!("Record count {count} overflows the calendar.")))
        })
        .collect()
}

fn uniform_column(rng: &mut StdRng, range: (f64, f64), decimals: i32, count: usize) -> Vec<f64> {
    let dist = Uniform::new(range.0, range.1);
    (0..count)
        .map(|_| round_to(dist.sample(rng), decimals))
        .collect()
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimals_ok(v: f64, decimals: i32) -> bool {
        (round_to(v, decimals) - v).abs() < 1e-9
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = generate_sales(200, 42, None).unwrap();
        let b = generate_sales(200, 42, None).unwrap();
        assert_eq!(a, b);

        let c = generate_sales(200, 43, None).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn dates_are_contiguous_from_epoch() {
        let ds = generate_sales(400, 7, None).unwrap();
        assert_eq!(ds.len(), 400);
        assert_eq!(ds.records()[0].date, epoch());
        for w in ds.records().windows(2) {
            assert_eq!(w[1].date - w[0].date, chrono::Duration::days(1));
        }
    }

    #[test]
    fn values_respect_ranges_and_rounding() {
        let ds = generate_sales(1000, 42, None).unwrap();
        for r in ds.iter() {
            assert!((1_000.0..=100_000.0).contains(&r.sales_amount), "sales {}", r.sales_amount);
            assert!((1..=49).contains(&r.units_sold), "units {}", r.units_sold);
            assert!((3.0..=5.0).contains(&r.customer_rating), "rating {}", r.customer_rating);
            assert!((0.1..=0.4).contains(&r.profit_margin), "margin {}", r.profit_margin);
            assert!((100.0..=10_000.0).contains(&r.gst_amount), "gst {}", r.gst_amount);

            assert!(decimals_ok(r.sales_amount, 2));
            assert!(decimals_ok(r.customer_rating, 1));
            assert!(decimals_ok(r.profit_margin, 3));
            assert!(decimals_ok(r.gst_amount, 2));

            assert!(Category::ALL.contains(&r.category));
            assert!(City::ALL.contains(&r.city));
        }
    }

    #[test]
    fn all_categories_and_cities_show_up() {
        let ds = generate_sales(1000, 42, None).unwrap();
        for c in Category::ALL {
            assert!(ds.iter().any(|r| r.category == c), "missing {c:?}");
        }
        for c in City::ALL {
            assert!(ds.iter().any(|r| r.city == c), "missing {c:?}");
        }
    }

    #[test]
    fn categorical_seed_only_moves_categorical_columns() {
        let a = generate_sales(300, 42, Some(1)).unwrap();
        let b = generate_sales(300, 42, Some(2)).unwrap();

        let sales_a: Vec<f64> = a.iter().map(|r| r.sales_amount).collect();
        let sales_b: Vec<f64> = b.iter().map(|r| r.sales_amount).collect();
        assert_eq!(sales_a, sales_b);

        let cats_a: Vec<Category> = a.iter().map(|r| r.category).collect();
        let cats_b: Vec<Category> = b.iter().map(|r| r.category).collect();
        assert_ne!(cats_a, cats_b);
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = generate_sales(0, 42, None).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(0.12351, 3), 0.124);
        assert_eq!(round_to(4.96, 1), 5.0);
    }
}
