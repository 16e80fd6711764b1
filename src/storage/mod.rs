pub mod json_backend;

use crate::account::Accounts;
use crate::errors::LedgerError;
use crate::ledger::Ledger;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends holding the account registry.
///
/// Loading never fails: missing or corrupt data degrades to the empty
/// registry, favoring availability over surfacing the loss. Flagging
/// the loss to the user is the surrounding application's job.
pub trait StorageBackend: Send + Sync {
    fn load_accounts(&self) -> Accounts;

    /// Whole-document overwrite, last-writer-wins.
    fn save_accounts(&self, accounts: &Accounts) -> Result<()>;

    /// The single-user ledger from before accounts existed, if any.
    /// Read-only: importing it never deletes the file.
    fn load_legacy_ledger(&self) -> Option<Ledger>;
}

pub use json_backend::JsonStorage;
