//! Text formatting for the console report.
//!
//! Formatting lives here so the aggregation code only deals in numbers and
//! output changes stay local.

use std::fmt;
use std::path::Path;

use super::SalesSummary;

pub const CURRENCY_SYMBOL: char = '₹';

/// Result of currency formatting.
///
/// `Raw` is the fallback for values that cannot be rendered as money (NaN or
/// infinite); it keeps the number so callers can still show something.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrencyText {
    Formatted(String),
    Raw { value: f64, reason: &'static str },
}

impl CurrencyText {
    pub fn is_formatted(&self) -> bool {
        matches!(self, CurrencyText::Formatted(_))
    }
}

impl fmt::Display for CurrencyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyText::Formatted(s) => f.write_str(s),
            CurrencyText::Raw { value, .. } => write!(f, "{value}"),
        }
    }
}

/// `1234567.5` -> `₹1,234,567.50`.
pub fn format_currency(amount: f64) -> CurrencyText {
    if !amount.is_finite() {
        return CurrencyText::Raw {
            value: amount,
            reason: "amount is not a finite number",
        };
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };

    CurrencyText::Formatted(format!(
        "{CURRENCY_SYMBOL}{sign}{}.{frac_part}",
        group_thousands(int_part)
    ))
}

/// Insert `,` every three digits from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_count(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// Mean rating as `"4.01/5.0"`.
pub fn format_rating(mean: f64) -> String {
    format!("{mean:.2}/5.0")
}

/// Fraction as a percentage with one decimal: `0.2534` -> `"25.3%"`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Axis label in lakhs (units of 100,000): `250000.0` -> `"₹2.5L"`.
pub fn format_lakhs(value: f64) -> String {
    format!("{CURRENCY_SYMBOL}{:.1}L", value / 100_000.0)
}

/// The summary block printed at the end of a run.
pub fn format_summary(summary: &SalesSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Indian Sales Analysis Summary ===\n\n");
    out.push_str(&format!("Total Sales: {}\n", summary.total_sales));
    out.push_str(&format!("Average Sale per Transaction: {}\n", summary.average_sale));
    out.push_str(&format!("Total Units Sold: {}\n", summary.total_units));
    out.push_str(&format!("Total GST Collected: {}\n", summary.total_gst));
    out.push_str(&format!("Average Customer Rating: {}\n", summary.avg_rating));
    out.push_str(&format!("Average Profit Margin: {}\n", summary.avg_profit_margin));
    out.push_str(&format!("Best Performing Category: {}\n", summary.best_category.display_name()));
    out.push_str(&format!("Best Performing City: {}\n", summary.best_city.display_name()));
    out.push_str(&format!("Best Performing Month: {}\n", summary.best_month));
    out.push_str(&format!("Total Number of Transactions: {}\n", summary.total_transactions));

    out
}

/// The list of chart files written by the visualizer.
pub fn format_chart_list(out_dir: &Path, files: &[&str]) -> String {
    let mut out = format!(
        "Visualization files have been saved in '{}' directory:\n",
        out_dir.display()
    );
    for f in files {
        out.push_str(&format!("- {f}\n"));
    }
    out
}
