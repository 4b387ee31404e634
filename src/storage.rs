//! Bankroll and settings persistence.
//!
//! Loading never fails: a missing document yields defaults, an unreadable
//! or invalid one yields defaults and a warning. Only saving reports errors.

use crate::money::Money;
use crate::settings::GameSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(String),
    #[error("storage format error: {0}")]
    Json(String),
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Json(err.to_string())
    }
}

pub trait BankrollStore {
    /// Saved bankroll, or `default` when nothing usable is stored.
    fn load_bankroll(&self, default: Money) -> Money;
    fn save_bankroll(&mut self, bankroll: Money) -> Result<(), StorageError>;
}

pub trait SettingsStore {
    /// Saved settings, or the defaults when nothing valid is stored.
    fn load_settings(&self) -> GameSettings;
    fn save_settings(&mut self, settings: &GameSettings) -> Result<(), StorageError>;
}

/// Both halves, for callers that keep one boxed store.
pub trait Store: BankrollStore + SettingsStore {}

impl<T: BankrollStore + SettingsStore> Store for T {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct Persisted {
    bankroll: Option<Money>,
    settings: Option<GameSettings>,
}

fn checked_settings(settings: Option<GameSettings>) -> GameSettings {
    match settings {
        Some(s) => match s.validate() {
            Ok(()) => s,
            Err(err) => {
                log::warn!("stored settings are invalid ({err}); using defaults");
                GameSettings::default()
            }
        },
        None => GameSettings::default(),
    }
}

/// One JSON document on disk holding the bankroll and the settings.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub const FILE_NAME: &'static str = ".blackjack-rs.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.blackjack-rs.json`, or the current directory without `HOME`.
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Persisted {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Persisted::default(),
            Err(err) => {
                log::warn!("cannot read {}: {err}; using defaults", self.path.display());
                return Persisted::default();
            }
        };
        serde_json::from_str(&data).unwrap_or_else(|err| {
            log::warn!("corrupt save file {}: {err}; using defaults", self.path.display());
            Persisted::default()
        })
    }

    fn update(&self, f: impl FnOnce(&mut Persisted)) -> Result<(), StorageError> {
        let mut doc = self.read();
        f(&mut doc);
        let data = serde_json::to_string_pretty(&doc)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl BankrollStore for JsonFileStore {
    fn load_bankroll(&self, default: Money) -> Money {
        self.read().bankroll.unwrap_or(default)
    }

    fn save_bankroll(&mut self, bankroll: Money) -> Result<(), StorageError> {
        self.update(|doc| doc.bankroll = Some(bankroll))
    }
}

impl SettingsStore for JsonFileStore {
    fn load_settings(&self) -> GameSettings {
        checked_settings(self.read().settings)
    }

    fn save_settings(&mut self, settings: &GameSettings) -> Result<(), StorageError> {
        self.update(|doc| doc.settings = Some(settings.clone()))
    }
}

/// In-process store. Clones share the same contents, so a test can keep a
/// handle to inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Persisted>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Persisted) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl BankrollStore for MemoryStore {
    fn load_bankroll(&self, default: Money) -> Money {
        self.with(|doc| doc.bankroll).unwrap_or(default)
    }

    fn save_bankroll(&mut self, bankroll: Money) -> Result<(), StorageError> {
        self.with(|doc| doc.bankroll = Some(bankroll));
        Ok(())
    }
}

impl SettingsStore for MemoryStore {
    fn load_settings(&self) -> GameSettings {
        checked_settings(self.with(|doc| doc.settings.clone()))
    }

    fn save_settings(&mut self, settings: &GameSettings) -> Result<(), StorageError> {
        self.with(|doc| doc.settings = Some(settings.clone()));
        Ok(())
    }
}
