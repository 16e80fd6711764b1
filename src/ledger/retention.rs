use chrono::{Datelike, Duration, NaiveDate};

use super::entry::Entry;
use super::target::Target;

/// Calendar months of history kept on every load and save.
pub const RETENTION_MONTHS: i32 = 14;

/// Computes the rolling retention boundary: `today` shifted back
/// fourteen calendar months, with the day clamped to the target month's
/// length. The boundary is recomputed from the clock on every access,
/// so entries retained yesterday can be pruned today purely because
/// time passed.
pub fn retention_cutoff(today: NaiveDate) -> NaiveDate {
    shift_months(today, -RETENTION_MONTHS)
}

/// Keeps every entry dated on or after `cutoff`, preserving relative
/// order. Pure: the input is untouched and a new collection returned.
pub fn filter_retained(entries: &[Entry], cutoff: NaiveDate) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.date.date_naive() >= cutoff)
        .cloned()
        .collect()
}

/// Keeps every target whose month begins on or after `cutoff`. Targets
/// with an unparsable month key are dropped along with the stale ones.
pub fn filter_retained_targets(targets: &[Target], cutoff: NaiveDate) -> Vec<Target> {
    targets
        .iter()
        .filter(|target| matches!(target.month_start(), Some(start) if start >= cutoff))
        .cloned()
        .collect()
}

fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_clamps_to_month_length() {
        // 2025-04-30 minus 14 months targets February 2024, a leap year.
        let today = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
        assert_eq!(
            retention_cutoff(today),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );

        let today = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
        assert_eq!(
            retention_cutoff(today),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }

    #[test]
    fn cutoff_crosses_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(
            retention_cutoff(today),
            NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
        );
    }
}
