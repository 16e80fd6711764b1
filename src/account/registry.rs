use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AuthError;
use crate::ledger::Ledger;

use super::{normalize_username, valid_username, Account, PasswordHash};

/// Registry of every known account, keyed by normalized username.
///
/// Serialized as a single JSON document; persistence is whole-document
/// overwrite with last-writer-wins semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Accounts {
    accounts: BTreeMap<String, Account>,
}

impl Accounts {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn get(&self, username: &str) -> Option<&Account> {
        self.accounts.get(&normalize_username(username))
    }

    pub fn ledger(&self, username: &str) -> Option<&Ledger> {
        self.get(username).map(|account| &account.ledger)
    }

    pub fn ledger_mut(&mut self, username: &str) -> Option<&mut Ledger> {
        self.accounts
            .get_mut(&normalize_username(username))
            .map(|account| &mut account.ledger)
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    /// Registers a new account. The first account ever created inherits
    /// the legacy single-user ledger when one is supplied; the legacy
    /// store itself is left untouched by the caller.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        legacy: Option<Ledger>,
    ) -> Result<&Account, AuthError> {
        let username = normalize_username(username);
        if !valid_username(&username) {
            return Err(AuthError::InvalidUsername);
        }
        if self.accounts.contains_key(&username) {
            return Err(AuthError::UsernameTaken);
        }
        let ledger = if self.accounts.is_empty() {
            match legacy {
                Some(imported) => {
                    info!(username = %username, "importing legacy ledger into first account");
                    imported
                }
                None => Ledger::default(),
            }
        } else {
            Ledger::default()
        };
        let credential = PasswordHash::new(password)?;
        let account = Account {
            username: username.clone(),
            credential,
            ledger,
        };
        Ok(self.accounts.entry(username).or_insert(account))
    }

    /// Checks a username/password pair. Unknown users and wrong
    /// passwords are indistinguishable to the caller.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<&Account, AuthError> {
        let account = self.get(username).ok_or(AuthError::InvalidCredentials)?;
        if account.credential.verify(password) {
            Ok(account)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Applies the retention window to every account's ledger.
    pub fn prune_all(&mut self, cutoff: NaiveDate) {
        for account in self.accounts.values_mut() {
            account.ledger.prune(cutoff);
        }
    }
}
