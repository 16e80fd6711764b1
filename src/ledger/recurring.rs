use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::{parse_timestamp, Entry};
use super::ledger::Ledger;

/// How often a recurring bill comes due.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(()),
        }
    }
}

/// A bill that comes due on a fixed cadence.
///
/// The lifecycle lives in `last_paid` rather than an explicit status
/// field; [`bill_state`] derives the current state from it. Bills are
/// exempt from the retention window and only leave the ledger by
/// explicit delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringBill {
    /// Defaulted on deserialization so legacy documents without ids
    /// still load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    pub frequency: Frequency,
    /// The bill is inactive before this date.
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub last_paid: Option<DateTime<Utc>>,
}

impl RecurringBill {
    pub fn new(
        amount: f64,
        category: impl Into<String>,
        frequency: Frequency,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category: category.into(),
            frequency,
            start_date,
            last_paid: None,
        }
    }
}

/// Observable lifecycle of a bill at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillState {
    /// The start date has not been reached.
    Pending,
    /// A payment is owed for the current period.
    Due,
    /// `last_paid` already covers the current period.
    Settled,
}

/// Derives the bill's state at `now`.
///
/// Daily and weekly cadences measure exact elapsed duration since the
/// last payment; monthly fires on the calendar month boundary instead,
/// so under two hours can elapse across New Year's Eve and the bill is
/// still due.
pub fn bill_state(bill: &RecurringBill, now: DateTime<Utc>) -> BillState {
    if now < bill.start_date {
        return BillState::Pending;
    }
    let due = match bill.last_paid {
        None => true,
        Some(last) => match bill.frequency {
            Frequency::Daily => now - last >= Duration::hours(24),
            Frequency::Weekly => now - last >= Duration::hours(7 * 24),
            Frequency::Monthly => {
                let current = now.date_naive();
                let paid = last.date_naive();
                current.month() != paid.month() || current.year() != paid.year()
            }
        },
    };
    if due {
        BillState::Due
    } else {
        BillState::Settled
    }
}

/// Applies one tick of the recurring engine: every due bill posts a
/// matching expense and records `now` as its last payment.
///
/// Evaluating the same instant twice posts nothing the second time; a
/// bill settled for the current period does not re-fire. Returns the
/// number of expenses posted.
pub fn apply_due_bills(ledger: &mut Ledger, now: DateTime<Utc>) -> usize {
    let Ledger {
        bills, expenses, ..
    } = ledger;
    let mut posted = 0;
    for bill in bills.iter_mut() {
        if bill_state(bill, now) == BillState::Due {
            expenses.push(Entry::recurring(bill.amount, bill.category.clone(), now));
            bill.last_paid = Some(now);
            posted += 1;
        }
    }
    posted
}

/// Explicit "pay now": posts an expense and updates `last_paid`
/// regardless of the derived state, so invoking it right after a tick
/// double-pays the period. Returns false when the bill id is unknown.
pub fn pay_now(ledger: &mut Ledger, bill_id: Uuid, now: DateTime<Utc>) -> bool {
    let Ledger {
        bills, expenses, ..
    } = ledger;
    match bills.iter_mut().find(|bill| bill.id == bill_id) {
        Some(bill) => {
            expenses.push(Entry::recurring(bill.amount, bill.category.clone(), now));
            bill.last_paid = Some(now);
            true
        }
        None => false,
    }
}

/// Raw recurring-bill fields as a form layer supplies them.
#[derive(Debug, Clone, Copy)]
pub struct BillInput<'a> {
    pub amount: &'a str,
    pub category: &'a str,
    pub frequency: &'a str,
    /// Mandatory start date.
    pub date: &'a str,
}

/// Validates raw input into a [`RecurringBill`]; any malformed field
/// silently discards the bill. The start date has no retention
/// constraint.
pub fn validate_bill(input: &BillInput) -> Option<RecurringBill> {
    let amount: f64 = input.amount.trim().parse().ok()?;
    if !amount.is_finite() {
        return None;
    }
    let category = input.category.trim();
    if category.is_empty() {
        return None;
    }
    let frequency: Frequency = input.frequency.parse().ok()?;
    let start_date = parse_timestamp(input.date)?;
    Some(RecurringBill::new(amount, category, frequency, start_date))
}
