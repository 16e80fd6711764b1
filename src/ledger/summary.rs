use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::entry::Entry;
use super::ledger::Ledger;

/// Share of current-month income set aside for tax.
const TAX_RESERVE_RATE: f64 = 0.30;
/// Trailing window feeding the burn-rate figure.
const BURN_WINDOW_DAYS: i64 = 90;

/// Read-only financial aggregates derived for display and export.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub income_total: f64,
    pub expense_total: f64,
    pub net: f64,
    pub income_by_category: Vec<CategoryTotal>,
    pub expense_by_category: Vec<CategoryTotal>,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub rolling_90_day_expenses: f64,
    pub monthly_burn_rate: f64,
    /// Months of solvency at the current burn rate; positive infinity
    /// when nothing is burning.
    pub runway_months: f64,
    pub tax_reserve: f64,
}

/// Per-category sum, in first-occurrence order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

impl Summary {
    pub fn income_for(&self, category: &str) -> Option<f64> {
        lookup(&self.income_by_category, category)
    }

    pub fn expense_for(&self, category: &str) -> Option<f64> {
        lookup(&self.expense_by_category, category)
    }
}

fn lookup(totals: &[CategoryTotal], category: &str) -> Option<f64> {
    totals
        .iter()
        .find(|entry| entry.category == category)
        .map(|entry| entry.total)
}

/// Computes the full set of aggregates over an already
/// retention-filtered ledger. Pure; assumes every amount is finite
/// (entry validation upstream guarantees it).
pub fn summarize(ledger: &Ledger, now: DateTime<Utc>) -> Summary {
    let income_total = total(&ledger.income);
    let expense_total = total(&ledger.expenses);
    let net = income_total - expense_total;

    let month = month_key(now);
    let monthly_income = month_total(&ledger.income, &month);
    let monthly_expenses = month_total(&ledger.expenses, &month);

    let rolling_90_day_expenses = ledger
        .expenses
        .iter()
        .filter(|entry| now - entry.date <= Duration::days(BURN_WINDOW_DAYS))
        .map(|entry| entry.amount)
        .sum::<f64>();
    let monthly_burn_rate = rolling_90_day_expenses / 3.0;
    let runway_months = if monthly_burn_rate == 0.0 {
        f64::INFINITY
    } else {
        net / monthly_burn_rate
    };

    Summary {
        income_total,
        expense_total,
        net,
        income_by_category: by_category(&ledger.income),
        expense_by_category: by_category(&ledger.expenses),
        monthly_income,
        monthly_expenses,
        rolling_90_day_expenses,
        monthly_burn_rate,
        runway_months,
        tax_reserve: monthly_income * TAX_RESERVE_RATE,
    }
}

/// Month grouping key in `YYYY-MM` form.
pub fn month_key(date: DateTime<Utc>) -> String {
    date.format("%Y-%m").to_string()
}

fn total(entries: &[Entry]) -> f64 {
    entries.iter().map(|entry| entry.amount).sum()
}

fn month_total(entries: &[Entry], month: &str) -> f64 {
    entries
        .iter()
        .filter(|entry| month_key(entry.date) == month)
        .map(|entry| entry.amount)
        .sum()
}

/// Accumulates per-category sums, keyed by the entry's exact category
/// text, in first-occurrence order.
fn by_category(entries: &[Entry]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for entry in entries {
        match totals.iter_mut().find(|t| t.category == entry.category) {
            Some(existing) => existing.total += entry.amount,
            None => totals.push(CategoryTotal {
                category: entry.category.clone(),
                total: entry.amount,
            }),
        }
    }
    totals
}
