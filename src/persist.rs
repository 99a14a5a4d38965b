//! Snapshot Persistence
//!
//! A key-value slot holding a JSON snapshot of the durable subset of store
//! state. Reads happen once, at container construction; writes are
//! fire-and-forget after every mutation, with no retry or acknowledgment.

use std::{
    cell::RefCell,
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::submissions::PriceSubmission;

/// The fixed application identifier the snapshot is keyed by.
pub const STORAGE_KEY: &str = "grocery-price-tracker";

/// Errors raised by persistence backends.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying filesystem error.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A key-value slot for serialized snapshots.
pub trait Persist: std::fmt::Debug {
    /// Reads the payload stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if the backend could not be read.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Writes `payload` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if the backend could not be written.
    fn save(&self, key: &str, payload: &str) -> Result<(), PersistError>;
}

/// The durable subset of store state: only the user's own submissions.
///
/// The canonical submission collection is deliberately absent; it is
/// re-seeded from the bundled dataset on every cold start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The user's own contributions.
    #[serde(rename = "userSubmissions", default)]
    pub user_submissions: Vec<PriceSubmission>,
}

impl Snapshot {
    /// Serializes the snapshot to its JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] on failure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a snapshot from its JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] for malformed payloads.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// File-backed persistence: one JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FilePersist {
    dir: PathBuf,
}

impl FilePersist {
    /// Creates a backend rooted at `dir`; the directory is created lazily.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The directory this backend writes under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Persist for FilePersist {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), payload)?;

        Ok(())
    }
}

/// In-memory persistence over a shared map.
///
/// Clones share the same underlying slots, so tests and demos can keep a
/// handle while the tracker owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersist {
    entries: Rc<RefCell<FxHashMap<String, String>>>,
}

impl MemoryPersist {
    /// Creates an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a stored payload directly, bypassing the trait.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Overwrites a slot directly, bypassing the trait.
    pub fn poke(&self, key: impl Into<String>, payload: impl Into<String>) {
        self.entries
            .borrow_mut()
            .insert(key.into(), payload.into());
    }
}

impl Persist for MemoryPersist {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, payload: &str) -> Result<(), PersistError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());

        Ok(())
    }
}
