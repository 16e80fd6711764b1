//! User accounts: username rules, credential hashing, and the registry
//! mapping normalized usernames to their ledgers.

pub mod credential;
pub mod registry;

pub use credential::PasswordHash;
pub use registry::Accounts;

use serde::{Deserialize, Serialize};

use crate::ledger::Ledger;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 32;

/// One registered user and their ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub credential: PasswordHash,
    #[serde(default)]
    pub ledger: Ledger,
}

/// Lowercases and trims a raw username. Every lookup and registration
/// goes through this form, making usernames case-insensitive.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Checks a normalized username against the allowed length and charset.
pub fn valid_username(name: &str) -> bool {
    (USERNAME_MIN..=USERNAME_MAX).contains(&name.len())
        && name
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
}
