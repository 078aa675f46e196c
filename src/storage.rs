//! Named durable slots used for small pieces of persisted state.
//!
//! The search surface only needs a handful of blobs (currently the recent
//! search history), so storage is modelled as a key-value store of strings.
//! [`FileSlotStore`] keeps one JSON file per slot inside the data directory
//! while [`MemorySlotStore`] backs tests and ephemeral sessions.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// Durable storage addressed by slot name.
pub trait SlotStore {
	/// Return the stored blob, or `None` if the slot has never been written.
	fn load(&self, slot: &str) -> Result<Option<String>, StorageError>;

	/// Replace the blob stored in `slot`.
	fn save(&self, slot: &str, value: &str) -> Result<(), StorageError>;

	/// Remove the slot. Removing a missing slot is not an error.
	fn remove(&self, slot: &str) -> Result<(), StorageError>;
}

/// Stores each slot as `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
	dir: PathBuf,
}

impl FileSlotStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	#[must_use]
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path_for(&self, slot: &str) -> Result<PathBuf, StorageError> {
		let valid = !slot.is_empty()
			&& slot
				.chars()
				.all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
		if !valid {
			return Err(StorageError::InvalidSlot(slot.to_string()));
		}
		Ok(self.dir.join(format!("{slot}.json")))
	}
}

impl SlotStore for FileSlotStore {
	fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
		let path = self.path_for(slot)?;
		match fs::read_to_string(&path) {
			Ok(contents) => Ok(Some(contents)),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(source) => Err(StorageError::Read { path, source }),
		}
	}

	fn save(&self, slot: &str, value: &str) -> Result<(), StorageError> {
		let path = self.path_for(slot)?;
		fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
			path: self.dir.clone(),
			source,
		})?;
		fs::write(&path, value).map_err(|source| StorageError::Write { path, source })
	}

	fn remove(&self, slot: &str) -> Result<(), StorageError> {
		let path = self.path_for(slot)?;
		match fs::remove_file(&path) {
			Ok(()) => Ok(()),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(source) => Err(StorageError::Remove { path, source }),
		}
	}
}

/// In-memory slots. Clones share the same backing map.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
	slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlotStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seed a slot, e.g. with a deliberately corrupt blob in tests.
	pub fn with_slot(self, slot: &str, value: &str) -> Self {
		self.lock().insert(slot.to_string(), value.to_string());
		self
	}

	#[must_use]
	pub fn get(&self, slot: &str) -> Option<String> {
		self.lock().get(slot).cloned()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
		// A poisoned map only means a test panicked mid-write; the data is still usable.
		self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

impl SlotStore for MemorySlotStore {
	fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
		Ok(self.get(slot))
	}

	fn save(&self, slot: &str, value: &str) -> Result<(), StorageError> {
		self.lock().insert(slot.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, slot: &str) -> Result<(), StorageError> {
		self.lock().remove(slot);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	#[test]
	fn file_store_round_trips_and_removes() {
		let dir = tempdir().unwrap();
		let store = FileSlotStore::new(dir.path().join("nested"));

		assert_eq!(store.load("history").unwrap(), None);
		store.save("history", "[]").unwrap();
		assert_eq!(store.load("history").unwrap().as_deref(), Some("[]"));
		assert!(dir.path().join("nested").join("history.json").exists());

		store.remove("history").unwrap();
		assert_eq!(store.load("history").unwrap(), None);
		store.remove("history").unwrap();
	}

	#[test]
	fn file_store_rejects_path_like_slots() {
		let dir = tempdir().unwrap();
		let store = FileSlotStore::new(dir.path());
		assert!(matches!(
			store.save("../escape", "x"),
			Err(StorageError::InvalidSlot(_))
		));
	}

	#[test]
	fn memory_store_clones_share_slots() {
		let store = MemorySlotStore::new();
		let other = store.clone();
		store.save("a", "1").unwrap();
		assert_eq!(other.get("a").as_deref(), Some("1"));
	}
}
