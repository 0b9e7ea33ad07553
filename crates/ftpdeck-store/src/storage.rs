// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Durable key/value slots holding JSON text.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::debug;

/// Named text slots that survive the process (or, for [`MemoryStorage`],
/// the store instance).
pub trait ScoreStorage: Send + Sync {
    fn read(&self, slot: &str) -> Result<Option<String>>;
    fn write(&self, slot: &str, value: &str) -> Result<()>;
    /// Removing a missing slot is not an error.
    fn remove(&self, slot: &str) -> Result<()>;
}

/// One `<slot>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl ScoreStorage for JsonFileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn write(&self, slot: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating storage directory {}", self.dir.display()))?;
        let path = self.slot_path(slot);
        debug!(path = %path.display(), "writing storage slot");
        fs::write(&path, value).with_context(|| format!("writing {}", path.display()))
    }

    fn remove(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }
}

/// Process-local slots.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStorage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().unwrap_or_else(|p| p.into_inner()).get(slot).cloned())
    }

    fn write(&self, slot: &str, value: &str) -> Result<()> {
        self.slots
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        self.slots.lock().unwrap_or_else(|p| p.into_inner()).remove(slot);
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_missing_slot_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let s = JsonFileStorage::new(dir.path());
        assert!(s.read("nothing").unwrap().is_none());
    }

    #[test]
    fn file_storage_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let s = JsonFileStorage::new(dir.path().join("nested/deeper"));
        s.write("slot", "{\"a\":[1]}").unwrap();
        assert!(dir.path().join("nested/deeper/slot.json").is_file());
        assert_eq!(s.read("slot").unwrap().as_deref(), Some("{\"a\":[1]}"));
    }

    #[test]
    fn file_storage_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let s = JsonFileStorage::new(dir.path());
        s.write("slot", "x").unwrap();
        s.remove("slot").unwrap();
        s.remove("slot").unwrap();
        assert!(s.read("slot").unwrap().is_none());
    }

    #[test]
    fn memory_storage_round_trip() {
        let s = MemoryStorage::new();
        s.write("k", "v").unwrap();
        assert_eq!(s.read("k").unwrap().as_deref(), Some("v"));
        s.remove("k").unwrap();
        assert!(s.read("k").unwrap().is_none());
    }
}
