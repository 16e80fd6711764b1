use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single income or expense line.
///
/// Entries are immutable once recorded; they leave the ledger either by
/// explicit delete or by falling behind the retention window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Defaulted on deserialization so legacy documents without ids
    /// still load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub amount: f64,
    /// Free-text grouping key, case-sensitive.
    pub category: String,
    pub date: DateTime<Utc>,
    /// Set on expenses posted by the recurring bill engine.
    #[serde(default)]
    pub recurring: bool,
}

impl Entry {
    pub fn new(amount: f64, category: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category: category.into(),
            date,
            recurring: false,
        }
    }

    /// An expense materialized from a recurring bill.
    pub(crate) fn recurring(amount: f64, category: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            recurring: true,
            ..Self::new(amount, category, date)
        }
    }
}

/// Raw entry fields as a form or import layer supplies them.
#[derive(Debug, Clone, Copy)]
pub struct EntryInput<'a> {
    pub amount: &'a str,
    pub category: &'a str,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to now when absent.
    pub date: Option<&'a str>,
}

impl<'a> EntryInput<'a> {
    pub fn new(amount: &'a str, category: &'a str) -> Self {
        Self {
            amount,
            category,
            date: None,
        }
    }

    pub fn dated(amount: &'a str, category: &'a str, date: &'a str) -> Self {
        Self {
            amount,
            category,
            date: Some(date),
        }
    }
}

/// Validates raw input into an [`Entry`].
///
/// Returns `None` when the input must be silently discarded: a
/// non-finite or unparsable amount, an empty category, an unparsable
/// date, or a date before the retention cutoff. Discarding is a no-op,
/// not an error; surfacing it is the form layer's job.
pub fn validate_entry(input: &EntryInput, now: DateTime<Utc>, cutoff: NaiveDate) -> Option<Entry> {
    let amount: f64 = input.amount.trim().parse().ok()?;
    if !amount.is_finite() {
        return None;
    }
    let category = input.category.trim();
    if category.is_empty() {
        return None;
    }
    let date = match input.date {
        None => now,
        Some(raw) => parse_timestamp(raw)?,
    };
    if date.date_naive() < cutoff {
        return None;
    }
    Some(Entry::new(amount, category, date))
}

/// Parses an RFC 3339 timestamp, falling back to a bare `YYYY-MM-DD`
/// date at midnight UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
