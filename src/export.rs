//! Presentation-free export surfaces: a CSV dump of the full ledger and
//! a plain-text report for the current month.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::errors::LedgerError;
use crate::ledger::{month_key, summarize, Ledger};

const CSV_HEADER: [&str; 6] = ["type", "category", "amount", "date", "frequency", "lastPaid"];

/// Renders the ledger as CSV with a fixed column order shared by
/// income, expense, and recurring rows. Entry rows leave the
/// `frequency` and `lastPaid` columns empty.
pub fn csv_document(ledger: &Ledger) -> Result<String, LedgerError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for entry in &ledger.income {
        let amount = entry.amount.to_string();
        let date = timestamp(entry.date);
        writer.write_record([
            "income",
            entry.category.as_str(),
            amount.as_str(),
            date.as_str(),
            "",
            "",
        ])?;
    }
    for entry in &ledger.expenses {
        let amount = entry.amount.to_string();
        let date = timestamp(entry.date);
        writer.write_record([
            "expense",
            entry.category.as_str(),
            amount.as_str(),
            date.as_str(),
            "",
            "",
        ])?;
    }
    for bill in &ledger.bills {
        let amount = bill.amount.to_string();
        let date = timestamp(bill.start_date);
        let last_paid = bill.last_paid.map(timestamp).unwrap_or_default();
        writer.write_record([
            "recurring",
            bill.category.as_str(),
            amount.as_str(),
            date.as_str(),
            bill.frequency.as_str(),
            last_paid.as_str(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Plain-text report for the month containing `now`: the headline
/// figures plus a spent-versus-budget line for each of the current
/// month's targets.
pub fn monthly_report(ledger: &Ledger, now: DateTime<Utc>) -> String {
    let summary = summarize(ledger, now);
    let month = month_key(now);
    let mut out = String::new();
    let _ = writeln!(out, "Monthly report for {month}");
    let _ = writeln!(out, "Income: {:.2}", summary.monthly_income);
    let _ = writeln!(out, "Expenses: {:.2}", summary.monthly_expenses);
    let _ = writeln!(
        out,
        "Net: {:.2}",
        summary.monthly_income - summary.monthly_expenses
    );
    let _ = writeln!(out, "Tax reserve: {:.2}", summary.tax_reserve);
    let _ = writeln!(out, "Burn rate: {:.2}/month", summary.monthly_burn_rate);
    if summary.runway_months.is_infinite() {
        let _ = writeln!(out, "Runway: ∞");
    } else {
        let _ = writeln!(out, "Runway: {:.1} months", summary.runway_months);
    }
    for target in ledger.targets.iter().filter(|t| t.month == month) {
        let spent = ledger
            .expenses
            .iter()
            .filter(|e| e.category == target.category && month_key(e.date) == month)
            .map(|e| e.amount)
            .sum::<f64>();
        let _ = writeln!(
            out,
            "{}: spent {:.2} of {:.2}",
            target.category, spent, target.amount
        );
    }
    out
}

fn timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}
