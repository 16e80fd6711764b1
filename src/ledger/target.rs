use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A monthly spending goal for one category.
///
/// Unique per (category, month) pair; setting the same pair again
/// overwrites the amount rather than duplicating the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Target {
    pub category: String,
    /// Month key in `YYYY-MM` form.
    pub month: String,
    pub amount: f64,
}

impl Target {
    pub fn new(category: impl Into<String>, month: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            month: month.into(),
            amount,
        }
    }

    /// First calendar day of the target's month, used by retention.
    pub fn month_start(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&format!("{}-01", self.month), "%Y-%m-%d").ok()
    }
}
