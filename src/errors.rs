use thiserror::Error;

/// Error type that captures ledger and persistence failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unknown account: {0}")]
    UnknownAccount(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Discrete authentication and registration failures.
///
/// These are reported back to the caller as messages; none of them abort
/// the application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("username must be 3-32 characters drawn from a-z, 0-9, '_', '-', and '.'")]
    InvalidUsername,
    #[error("username is already taken")]
    UsernameTaken,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("credential hashing failed: {0}")]
    Hash(String),
}
