#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use ledger_core::{manager::LedgerManager, storage::JsonStorage, time::FixedClock};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub struct TestEnv {
    pub manager: LedgerManager,
    pub clock: FixedClock,
    pub base: PathBuf,
}

/// Creates an isolated manager rooted at a unique directory, with the
/// clock pinned to `at`.
pub fn env_at(at: DateTime<Utc>) -> TestEnv {
    let base = temp_base();
    let clock = FixedClock::at(at);
    let manager = manager_on(&base, &clock);
    TestEnv {
        manager,
        clock,
        base,
    }
}

/// A fresh manager over an existing base directory, sharing `clock`.
pub fn manager_on(base: &Path, clock: &FixedClock) -> LedgerManager {
    let storage = JsonStorage::new(base.to_path_buf()).expect("create json storage backend");
    LedgerManager::new(Box::new(storage), Box::new(clock.clone()))
}

/// Reserves a unique directory that lives until the end of the test run.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}
