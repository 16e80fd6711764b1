//! Ledger domain models and the retention, recurring, and aggregation engines.

pub mod entry;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod recurring;
pub mod retention;
pub mod summary;
pub mod target;

pub use entry::{validate_entry, Entry, EntryInput};
pub use ledger::Ledger;
pub use recurring::{
    apply_due_bills, bill_state, pay_now, validate_bill, BillInput, BillState, Frequency,
    RecurringBill,
};
pub use retention::{filter_retained, filter_retained_targets, retention_cutoff, RETENTION_MONTHS};
pub use summary::{month_key, summarize, CategoryTotal, Summary};
pub use target::Target;
