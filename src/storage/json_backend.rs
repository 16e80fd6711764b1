use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::account::Accounts;
use crate::ledger::Ledger;

use super::{Result, StorageBackend};

const ACCOUNTS_FILE: &str = "accounts.json";
const LEGACY_LEDGER_FILE: &str = "ledger.json";
const TMP_SUFFIX: &str = "tmp";

/// Whole-document JSON persistence rooted at a single directory.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Creates storage rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Creates storage under the platform data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(default_root())
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.root.join(ACCOUNTS_FILE)
    }

    pub fn legacy_path(&self) -> PathBuf {
        self.root.join(LEGACY_LEDGER_FILE)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }
}

impl StorageBackend for JsonStorage {
    fn load_accounts(&self) -> Accounts {
        let path = self.accounts_path();
        if !path.exists() {
            return Accounts::default();
        }
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable accounts file, starting empty");
                return Accounts::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(accounts) => accounts,
            Err(err) => {
                warn!(path = %path.display(), %err, "corrupt accounts file, starting empty");
                Accounts::default()
            }
        }
    }

    fn save_accounts(&self, accounts: &Accounts) -> Result<()> {
        let path = self.accounts_path();
        let json = serde_json::to_string_pretty(accounts)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load_legacy_ledger(&self) -> Option<Ledger> {
        let path = self.legacy_path();
        let data = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&data) {
            Ok(ledger) => Some(ledger),
            Err(err) => {
                warn!(path = %path.display(), %err, "corrupt legacy ledger ignored");
                None
            }
        }
    }
}

/// Default storage root under the platform data directory.
pub fn default_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ledger_core")
}

pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(temp.path().to_path_buf()).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn missing_accounts_file_loads_empty() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(storage.load_accounts().is_empty());
    }

    #[test]
    fn corrupt_accounts_file_loads_empty() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.accounts_path(), "{ not json").expect("write garbage");
        assert!(storage.load_accounts().is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let mut accounts = Accounts::default();
        accounts
            .register("casey", "hunter2-but-longer", None)
            .expect("register");
        storage.save_accounts(&accounts).expect("save accounts");
        let loaded = storage.load_accounts();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.get("casey").is_some());
    }

    #[test]
    fn corrupt_legacy_ledger_is_ignored() {
        let (storage, _guard) = storage_with_temp_dir();
        fs::write(storage.legacy_path(), "[oops").expect("write garbage");
        assert!(storage.load_legacy_ledger().is_none());
    }
}
