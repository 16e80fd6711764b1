#![doc(test(attr(deny(warnings))))]

//! Ledger Core provides the retention, recurring-bill, and aggregation
//! engines behind a personal finance ledger, together with the account
//! registry and JSON persistence that surround them.

pub mod account;
pub mod config;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod manager;
pub mod storage;
pub mod time;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("ledger_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
