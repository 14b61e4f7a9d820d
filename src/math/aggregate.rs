//! Group aggregates over a dataset.
//!
//! Groups are returned in the order of the key set passed in (enum declaration
//! order for categories and cities, calendar order for months, Monday first for
//! weekdays). Keys with no records are left out of sums; weekday means keep a
//! slot for every day so the chart order never shifts.

use std::collections::BTreeMap;

use chrono::Weekday;

use crate::domain::{Category, City, SalesDataset, SalesRecord};

/// Weekdays in display order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Sum `sales_amount` per key, keeping `order` and dropping keys never seen.
pub fn sum_sales_by<K, F>(dataset: &SalesDataset, order: &[K], key: F) -> Vec<(K, f64)>
where
    K: Copy + PartialEq,
    F: Fn(&SalesRecord) -> K,
{
    let mut totals = vec![0.0; order.len()];
    let mut seen = vec![false; order.len()];

    for r in dataset.iter() {
        let k = key(r);
        if let Some(idx) = order.iter().position(|o| *o == k) {
            totals[idx] += r.sales_amount;
            seen[idx] = true;
        }
    }

    order
        .iter()
        .zip(totals)
        .zip(seen)
        .filter(|(_, seen)| *seen)
        .map(|((k, total), _)| (*k, total))
        .collect()
}

pub fn category_totals(dataset: &SalesDataset) -> Vec<(Category, f64)> {
    sum_sales_by(dataset, &Category::ALL, |r| r.category)
}

/// Category totals, largest first. Equal totals keep declaration order.
pub fn category_totals_desc(dataset: &SalesDataset) -> Vec<(Category, f64)> {
    let mut totals = category_totals(dataset);
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
}

pub fn city_totals(dataset: &SalesDataset) -> Vec<(City, f64)> {
    sum_sales_by(dataset, &City::ALL, |r| r.city)
}

/// Sum of sales per `(year, month)`, in calendar order.
pub fn monthly_totals(dataset: &SalesDataset) -> Vec<((i32, u32), f64)> {
    let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for r in dataset.iter() {
        *months.entry(r.month_key()).or_insert(0.0) += r.sales_amount;
    }
    months.into_iter().collect()
}

/// Mean sales per weekday, Monday through Sunday. `None` for days with no records.
pub fn weekday_means(dataset: &SalesDataset) -> Vec<(Weekday, Option<f64>)> {
    let mut sums = [0.0f64; 7];
    let mut counts = [0usize; 7];
    for r in dataset.iter() {
        let idx = r.day_of_week().num_days_from_monday() as usize;
        sums[idx] += r.sales_amount;
        counts[idx] += 1;
    }

    WEEKDAYS
        .iter()
        .map(|&day| {
            let idx = day.num_days_from_monday() as usize;
            let mean = (counts[idx] > 0).then(|| sums[idx] / counts[idx] as f64);
            (day, mean)
        })
        .collect()
}

/// Key with the largest value; the first one wins on ties.
pub fn argmax<K: Copy>(totals: &[(K, f64)]) -> Option<K> {
    let mut best: Option<(K, f64)> = None;
    for &(k, v) in totals {
        match best {
            Some((_, bv)) if v <= bv => {}
            _ if v.is_nan() => {}
            _ => best = Some((k, v)),
        }
    }
    best.map(|(k, _)| k)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(date: (i32, u32, u32), category: Category, city: City, sales: f64) -> SalesRecord {
        SalesRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category,
            city,
            sales_amount: sales,
            units_sold: 1,
            customer_rating: 4.0,
            profit_margin: 0.2,
            gst_amount: 100.0,
        }
    }

    #[test]
    fn totals_skip_missing_groups_and_keep_order() {
        let ds = SalesDataset::new(vec![
            rec((2023, 1, 1), Category::Books, City::Delhi, 10.0),
            rec((2023, 1, 2), Category::Electronics, City::Delhi, 5.0),
            rec((2023, 1, 3), Category::Books, City::Pune, 1.0),
        ]);

        let cats = category_totals(&ds);
        assert_eq!(cats, vec![(Category::Electronics, 5.0), (Category::Books, 11.0)]);

        let desc = category_totals_desc(&ds);
        assert_eq!(desc[0].0, Category::Books);

        let cities = city_totals(&ds);
        assert_eq!(cities, vec![(City::Delhi, 15.0), (City::Pune, 1.0)]);
    }

    #[test]
    fn months_in_calendar_order() {
        let ds = SalesDataset::new(vec![
            rec((2024, 2, 1), Category::Books, City::Delhi, 3.0),
            rec((2023, 12, 31), Category::Books, City::Delhi, 2.0),
            rec((2023, 12, 1), Category::Books, City::Delhi, 1.0),
        ]);
        let months = monthly_totals(&ds);
        assert_eq!(months, vec![((2023, 12), 3.0), ((2024, 2), 3.0)]);
    }

    #[test]
    fn weekday_means_are_monday_first() {
        // 2023-01-01 is a Sunday, 2023-01-04 a Wednesday.
        let ds = SalesDataset::new(vec![
            rec((2023, 1, 1), Category::Books, City::Delhi, 10.0),
            rec((2023, 1, 8), Category::Books, City::Delhi, 20.0),
            rec((2023, 1, 4), Category::Books, City::Delhi, 7.0),
        ]);
        let means = weekday_means(&ds);
        let days: Vec<Weekday> = means.iter().map(|(d, _)| *d).collect();
        assert_eq!(days, WEEKDAYS.to_vec());
        assert_eq!(means[0].1, None);
        assert_eq!(means[2].1, Some(7.0));
        assert_eq!(means[6].1, Some(15.0));
    }

    #[test]
    fn argmax_prefers_first_on_tie() {
        assert_eq!(argmax(&[("a", 1.0), ("b", 3.0), ("c", 3.0)]), Some("b"));
        assert_eq!(argmax(&[("a", f64::NAN), ("b", 2.0)]), Some("b"));
        assert_eq!(argmax::<&str>(&[]), None);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
    }
}
