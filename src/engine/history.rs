//! Bounded, deduplicated history of executed searches.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::storage::SlotStore;

/// Slot name used for the persisted history blob.
pub const HISTORY_SLOT: &str = "recent-searches";
/// Capacity of the compact search surface.
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
	pub text: String,
	#[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
	pub executed_at: DateTime<Utc>,
}

impl HistoryEntry {
	pub fn new(text: impl Into<String>, executed_at: DateTime<Utc>) -> Self {
		Self {
			text: text.into(),
			executed_at,
		}
	}
}

/// Most-recent-first history, written through to a [`SlotStore`] after every
/// mutation.
///
/// Nothing here returns an error: unreadable or unwritable storage degrades to
/// an in-memory history and is only logged.
pub struct HistoryStore<S> {
	entries: Vec<HistoryEntry>,
	capacity: usize,
	store: S,
	slot: String,
}

impl<S: SlotStore> HistoryStore<S> {
	/// Load the history from `slot`, falling back to empty on any failure.
	pub fn load(store: S, slot: impl Into<String>, capacity: usize) -> Self {
		let slot = slot.into();
		let capacity = capacity.max(1);
		let mut entries = match store.load(&slot) {
			Ok(Some(blob)) => match serde_json::from_str::<Vec<HistoryEntry>>(&blob) {
				Ok(entries) => entries,
				Err(err) => {
					warn!("ignoring unreadable search history in slot '{slot}': {err}");
					Vec::new()
				}
			},
			Ok(None) => Vec::new(),
			Err(err) => {
				warn!("could not read search history: {err}");
				Vec::new()
			}
		};
		dedup_in_order(&mut entries);
		entries.truncate(capacity);
		debug!("loaded {} history entries", entries.len());

		Self {
			entries,
			capacity,
			store,
			slot,
		}
	}

	/// Record an executed search at the current time.
	pub fn record(&mut self, text: &str) {
		self.record_at(text, Utc::now());
	}

	/// Record an executed search with an explicit timestamp.
	pub fn record_at(&mut self, text: &str, executed_at: DateTime<Utc>) {
		let text = text.trim();
		if text.is_empty() {
			return;
		}
		self.entries.retain(|entry| entry.text != text);
		self.entries.insert(0, HistoryEntry::new(text, executed_at));
		self.entries.truncate(self.capacity);
		self.persist();
	}

	/// Remove every entry and the persisted blob.
	pub fn clear(&mut self) {
		self.entries.clear();
		if let Err(err) = self.store.remove(&self.slot) {
			warn!("could not remove search history: {err}");
		}
	}

	#[must_use]
	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}

	#[must_use]
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	#[must_use]
	pub fn store(&self) -> &S {
		&self.store
	}

	fn persist(&self) {
		let blob = match serde_json::to_string(&self.entries) {
			Ok(blob) => blob,
			Err(err) => {
				warn!("could not encode search history: {err}");
				return;
			}
		};
		if let Err(err) = self.store.save(&self.slot, &blob) {
			warn!("could not persist search history: {err}");
		}
	}
}

fn dedup_in_order(entries: &mut Vec<HistoryEntry>) {
	let mut seen = std::collections::HashSet::new();
	entries.retain(|entry| seen.insert(entry.text.clone()));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::storage::{FileSlotStore, MemorySlotStore};
	use chrono::TimeZone;
	use tempfile::tempdir;

	fn at(seconds: i64) -> DateTime<Utc> {
		Utc.timestamp_opt(seconds, 0).unwrap()
	}

	fn texts<S: SlotStore>(history: &HistoryStore<S>) -> Vec<&str> {
		history.entries().iter().map(|e| e.text.as_str()).collect()
	}

	#[test]
	fn recording_twice_keeps_one_entry_first() {
		let mut history = HistoryStore::load(MemorySlotStore::new(), HISTORY_SLOT, 5);
		history.record_at("rust lifetimes", at(1));
		history.record_at("react hooks", at(2));
		history.record_at("vue slots", at(3));
		history.record_at("react hooks", at(4));

		assert_eq!(texts(&history), vec!["react hooks", "vue slots", "rust lifetimes"]);
		assert_eq!(history.entries()[0].executed_at, at(4));
	}

	#[test]
	fn sixth_entry_evicts_the_oldest() {
		let mut history = HistoryStore::load(MemorySlotStore::new(), HISTORY_SLOT, 5);
		for (i, text) in ["a1", "b2", "c3", "d4", "e5", "f6"].iter().enumerate() {
			history.record_at(text, at(i as i64));
		}
		assert_eq!(texts(&history), vec!["f6", "e5", "d4", "c3", "b2"]);
	}

	#[test]
	fn dedup_is_case_sensitive() {
		let mut history = HistoryStore::load(MemorySlotStore::new(), HISTORY_SLOT, 5);
		history.record_at("Rust", at(1));
		history.record_at("rust", at(2));
		assert_eq!(texts(&history), vec!["rust", "Rust"]);
	}

	#[test]
	fn blank_text_is_never_recorded() {
		let store = MemorySlotStore::new();
		let mut history = HistoryStore::load(store.clone(), HISTORY_SLOT, 5);
		history.record_at("   ", at(1));
		assert!(history.entries().is_empty());
		assert_eq!(store.get(HISTORY_SLOT), None);
	}

	#[test]
	fn every_mutation_is_persisted_as_json_array() {
		let store = MemorySlotStore::new();
		let mut history = HistoryStore::load(store.clone(), HISTORY_SLOT, 5);
		history.record_at("graphql", at(1));

		let blob = store.get(HISTORY_SLOT).unwrap();
		assert_eq!(blob, r#"[{"text":"graphql","timestamp":1000}]"#);

		history.clear();
		assert!(history.entries().is_empty());
		assert_eq!(store.get(HISTORY_SLOT), None);
	}

	#[test]
	fn corrupt_blob_falls_back_to_empty() {
		let store = MemorySlotStore::new().with_slot(HISTORY_SLOT, "{not json");
		let history = HistoryStore::load(store, HISTORY_SLOT, 5);
		assert!(history.entries().is_empty());
	}

	#[test]
	fn oversized_blob_is_truncated_on_load() {
		let blob = serde_json::to_string(
			&(0..8)
				.map(|i| HistoryEntry::new(format!("q{i}"), at(i)))
				.collect::<Vec<_>>(),
		)
		.unwrap();
		let store = MemorySlotStore::new().with_slot(HISTORY_SLOT, &blob);
		let history = HistoryStore::load(store, HISTORY_SLOT, 5);
		assert_eq!(texts(&history), vec!["q0", "q1", "q2", "q3", "q4"]);
	}

	#[test]
	fn file_backed_history_survives_reload() {
		let dir = tempdir().unwrap();
		let mut history = HistoryStore::load(FileSlotStore::new(dir.path()), HISTORY_SLOT, 5);
		history.record_at("kubernetes operators", at(10));
		drop(history);

		let reloaded = HistoryStore::load(FileSlotStore::new(dir.path()), HISTORY_SLOT, 5);
		assert_eq!(texts(&reloaded), vec!["kubernetes operators"]);
		assert_eq!(reloaded.entries()[0].executed_at, at(10));
	}
}
