use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::Entry;
use super::recurring::RecurringBill;
use super::retention::{filter_retained, filter_retained_targets};
use super::target::Target;

/// One user's complete financial record: income, expenses, recurring
/// bills, and monthly spending targets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub income: Vec<Entry>,
    #[serde(default)]
    pub expenses: Vec<Entry>,
    #[serde(default)]
    pub bills: Vec<RecurringBill>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_income(&mut self, entry: Entry) -> Uuid {
        let id = entry.id;
        self.income.push(entry);
        id
    }

    pub fn add_expense(&mut self, entry: Entry) -> Uuid {
        let id = entry.id;
        self.expenses.push(entry);
        id
    }

    pub fn add_bill(&mut self, bill: RecurringBill) -> Uuid {
        let id = bill.id;
        self.bills.push(bill);
        id
    }

    pub fn delete_income(&mut self, id: Uuid) -> bool {
        remove_entry(&mut self.income, id)
    }

    pub fn delete_expense(&mut self, id: Uuid) -> bool {
        remove_entry(&mut self.expenses, id)
    }

    pub fn delete_bill(&mut self, id: Uuid) -> bool {
        let before = self.bills.len();
        self.bills.retain(|bill| bill.id != id);
        self.bills.len() != before
    }

    pub fn bill(&self, id: Uuid) -> Option<&RecurringBill> {
        self.bills.iter().find(|bill| bill.id == id)
    }

    /// Sets the goal for a (category, month) pair, overwriting any
    /// previous amount for the same pair.
    pub fn set_target(
        &mut self,
        category: impl Into<String>,
        month: impl Into<String>,
        amount: f64,
    ) {
        let category = category.into();
        let month = month.into();
        match self
            .targets
            .iter_mut()
            .find(|target| target.category == category && target.month == month)
        {
            Some(existing) => existing.amount = amount,
            None => self.targets.push(Target::new(category, month, amount)),
        }
    }

    pub fn delete_target(&mut self, category: &str, month: &str) -> bool {
        let before = self.targets.len();
        self.targets
            .retain(|target| !(target.category == category && target.month == month));
        self.targets.len() != before
    }

    /// Drops income, expenses, and targets that fall before `cutoff`.
    /// Recurring bills are exempt.
    pub fn prune(&mut self, cutoff: NaiveDate) {
        self.income = filter_retained(&self.income, cutoff);
        self.expenses = filter_retained(&self.expenses, cutoff);
        self.targets = filter_retained_targets(&self.targets, cutoff);
    }
}

fn remove_entry(entries: &mut Vec<Entry>, id: Uuid) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.id != id);
    entries.len() != before
}
