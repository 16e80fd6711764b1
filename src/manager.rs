//! High-level facade wiring the clock, storage, and account registry
//! into the load, prune, tick, save control flow.

use tracing::{debug, info};
use uuid::Uuid;

use crate::account::Accounts;
use crate::errors::LedgerError;
use crate::export;
use crate::ledger::{
    apply_due_bills, pay_now, retention_cutoff, summarize, validate_bill, validate_entry,
    BillInput, EntryInput, Ledger, Summary,
};
use crate::storage::StorageBackend;
use crate::time::Clock;

/// Coordinates every ledger operation for the application.
///
/// All mutations are followed synchronously by a whole-registry save;
/// there is no batching and no cross-operation locking. The design is
/// single-user-per-session: two concurrent writers to the same account
/// lose updates to last-writer-wins persistence.
pub struct LedgerManager {
    accounts: Accounts,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
}

impl LedgerManager {
    /// Loads the registry from storage. Corrupt or missing data starts
    /// the registry empty rather than failing.
    pub fn new(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        let accounts = storage.load_accounts();
        Self {
            accounts,
            storage,
            clock,
        }
    }

    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// Registers a new account. The first account ever created imports
    /// the legacy single-user ledger when one exists; the legacy store
    /// is left in place afterwards.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), LedgerError> {
        let legacy = if self.accounts.is_empty() {
            self.storage.load_legacy_ledger()
        } else {
            None
        };
        let account = self.accounts.register(username, password, legacy)?;
        info!(username = %account.username, "registered account");
        self.persist()
    }

    /// Checks a username/password pair, returning the normalized
    /// username for the session layer to track.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, LedgerError> {
        let account = self.accounts.authenticate(username, password)?;
        Ok(account.username.clone())
    }

    /// One tick: prunes the retention window, applies due bills, and
    /// saves. Runs on every ledger access; the save happens even when
    /// nothing changed. Returns the number of expenses posted.
    pub fn refresh(&mut self, username: &str) -> Result<usize, LedgerError> {
        let now = self.clock.now();
        let cutoff = retention_cutoff(now.date_naive());
        let ledger = self.ledger_mut(username)?;
        ledger.prune(cutoff);
        let posted = apply_due_bills(ledger, now);
        if posted > 0 {
            debug!(username, posted, "recurring bills posted");
        }
        self.persist()?;
        Ok(posted)
    }

    /// Validates and records an income entry. Malformed or
    /// out-of-window input is silently discarded as `Ok(None)`.
    pub fn add_income(
        &mut self,
        username: &str,
        input: &EntryInput,
    ) -> Result<Option<Uuid>, LedgerError> {
        self.refresh(username)?;
        let now = self.clock.now();
        let cutoff = retention_cutoff(now.date_naive());
        let entry = match validate_entry(input, now, cutoff) {
            Some(entry) => entry,
            None => return Ok(None),
        };
        let id = self.ledger_mut(username)?.add_income(entry);
        self.persist()?;
        Ok(Some(id))
    }

    /// Validates and records an expense entry, with the same silent
    /// discard rules as [`LedgerManager::add_income`].
    pub fn add_expense(
        &mut self,
        username: &str,
        input: &EntryInput,
    ) -> Result<Option<Uuid>, LedgerError> {
        self.refresh(username)?;
        let now = self.clock.now();
        let cutoff = retention_cutoff(now.date_naive());
        let entry = match validate_entry(input, now, cutoff) {
            Some(entry) => entry,
            None => return Ok(None),
        };
        let id = self.ledger_mut(username)?.add_expense(entry);
        self.persist()?;
        Ok(Some(id))
    }

    pub fn delete_income(&mut self, username: &str, id: Uuid) -> Result<bool, LedgerError> {
        self.refresh(username)?;
        let removed = self.ledger_mut(username)?.delete_income(id);
        self.persist()?;
        Ok(removed)
    }

    pub fn delete_expense(&mut self, username: &str, id: Uuid) -> Result<bool, LedgerError> {
        self.refresh(username)?;
        let removed = self.ledger_mut(username)?.delete_expense(id);
        self.persist()?;
        Ok(removed)
    }

    /// Validates and records a recurring bill; malformed input is
    /// silently discarded. The bill first fires on the next refresh at
    /// or after its start date.
    pub fn add_bill(
        &mut self,
        username: &str,
        input: &BillInput,
    ) -> Result<Option<Uuid>, LedgerError> {
        self.refresh(username)?;
        let bill = match validate_bill(input) {
            Some(bill) => bill,
            None => return Ok(None),
        };
        let id = self.ledger_mut(username)?.add_bill(bill);
        self.persist()?;
        Ok(Some(id))
    }

    pub fn delete_bill(&mut self, username: &str, id: Uuid) -> Result<bool, LedgerError> {
        self.refresh(username)?;
        let removed = self.ledger_mut(username)?.delete_bill(id);
        self.persist()?;
        Ok(removed)
    }

    /// Explicit "pay now" on a bill: always posts an expense and
    /// advances `last_paid`, even when the period is already settled.
    pub fn pay_bill_now(&mut self, username: &str, id: Uuid) -> Result<bool, LedgerError> {
        self.refresh(username)?;
        let now = self.clock.now();
        let paid = pay_now(self.ledger_mut(username)?, id, now);
        self.persist()?;
        Ok(paid)
    }

    /// Sets the spending goal for a (category, month) pair, overwriting
    /// any previous amount for the same pair.
    pub fn set_target(
        &mut self,
        username: &str,
        category: &str,
        month: &str,
        amount: f64,
    ) -> Result<(), LedgerError> {
        self.refresh(username)?;
        self.ledger_mut(username)?.set_target(category, month, amount);
        self.persist()
    }

    pub fn delete_target(
        &mut self,
        username: &str,
        category: &str,
        month: &str,
    ) -> Result<bool, LedgerError> {
        self.refresh(username)?;
        let removed = self.ledger_mut(username)?.delete_target(category, month);
        self.persist()?;
        Ok(removed)
    }

    /// Derives the read-only aggregates for display, ticking first so
    /// the figures reflect freshly due bills and the current window.
    pub fn summary(&mut self, username: &str) -> Result<Summary, LedgerError> {
        self.refresh(username)?;
        let now = self.clock.now();
        let ledger = self.ledger(username)?;
        Ok(summarize(ledger, now))
    }

    /// Renders the ledger as CSV with a fixed column order.
    pub fn export_csv(&mut self, username: &str) -> Result<String, LedgerError> {
        self.refresh(username)?;
        let ledger = self.ledger(username)?;
        export::csv_document(ledger)
    }

    /// Renders the plain-text report for the current month.
    pub fn monthly_report(&mut self, username: &str) -> Result<String, LedgerError> {
        self.refresh(username)?;
        let now = self.clock.now();
        let ledger = self.ledger(username)?;
        Ok(export::monthly_report(ledger, now))
    }

    fn ledger(&self, username: &str) -> Result<&Ledger, LedgerError> {
        self.accounts
            .ledger(username)
            .ok_or_else(|| LedgerError::UnknownAccount(username.into()))
    }

    fn ledger_mut(&mut self, username: &str) -> Result<&mut Ledger, LedgerError> {
        self.accounts
            .ledger_mut(username)
            .ok_or_else(|| LedgerError::UnknownAccount(username.into()))
    }

    /// Prunes every ledger and writes the whole registry, so a save
    /// never persists already-stale data.
    fn persist(&mut self) -> Result<(), LedgerError> {
        let cutoff = retention_cutoff(self.clock.today());
        self.accounts.prune_all(cutoff);
        self.storage.save_accounts(&self.accounts)
    }
}
