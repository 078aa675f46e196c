//! Merge of the four suggestion sources into one flat, navigable list.
//!
//! Sections always appear in the order [`SectionKind::ORDER`]; empty sections
//! are skipped. Each entry gets a flat index equal to the number of entries in
//! the sections before it plus its position inside its own section.

use super::history::HistoryEntry;
use super::results::ResultItem;
use super::suggest::{Icon, Suggestion};
use super::trending::TrendingEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
	Suggestions,
	Results,
	History,
	Trending,
}

impl SectionKind {
	pub const ORDER: [SectionKind; 4] = [
		SectionKind::Suggestions,
		SectionKind::Results,
		SectionKind::History,
		SectionKind::Trending,
	];

	#[must_use]
	pub fn title(self) -> &'static str {
		match self {
			SectionKind::Suggestions => "Suggestions",
			SectionKind::Results => "Results",
			SectionKind::History => "Recent searches",
			SectionKind::Trending => "Trending",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPayload {
	Suggestion(Suggestion),
	Result(ResultItem),
	History(HistoryEntry),
	Trending(TrendingEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeEntry {
	/// Flat index over the whole list.
	pub index: usize,
	/// Position inside the owning section.
	pub position: usize,
	pub payload: EntryPayload,
}

impl CompositeEntry {
	#[must_use]
	pub fn section(&self) -> SectionKind {
		match self.payload {
			EntryPayload::Suggestion(_) => SectionKind::Suggestions,
			EntryPayload::Result(_) => SectionKind::Results,
			EntryPayload::History(_) => SectionKind::History,
			EntryPayload::Trending(_) => SectionKind::Trending,
		}
	}

	#[must_use]
	pub fn label(&self) -> &str {
		match &self.payload {
			EntryPayload::Suggestion(suggestion) => &suggestion.label,
			EntryPayload::Result(item) => &item.title,
			EntryPayload::History(entry) => &entry.text,
			EntryPayload::Trending(entry) => &entry.text,
		}
	}

	/// Secondary text, if the entry has any.
	#[must_use]
	pub fn detail(&self) -> Option<&str> {
		match &self.payload {
			EntryPayload::Result(item) if !item.excerpt.is_empty() => Some(&item.excerpt),
			_ => None,
		}
	}

	/// Text submitted when this entry is executed.
	#[must_use]
	pub fn executable_text(&self) -> &str {
		match &self.payload {
			EntryPayload::Suggestion(suggestion) => &suggestion.executable_query,
			EntryPayload::Result(item) => &item.title,
			EntryPayload::History(entry) => &entry.text,
			EntryPayload::Trending(entry) => &entry.text,
		}
	}

	#[must_use]
	pub fn icon(&self) -> Icon {
		match &self.payload {
			EntryPayload::Suggestion(suggestion) => suggestion.icon,
			EntryPayload::Result(item) => item.kind.icon(),
			EntryPayload::History(_) => Icon::Clock,
			EntryPayload::Trending(_) => Icon::Trending,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
	pub kind: SectionKind,
	/// Flat index of the first entry.
	pub start: usize,
	pub len: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeList {
	entries: Vec<CompositeEntry>,
	sections: Vec<Section>,
}

impl CompositeList {
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&CompositeEntry> {
		self.entries.get(index)
	}

	#[must_use]
	pub fn entries(&self) -> &[CompositeEntry] {
		&self.entries
	}

	#[must_use]
	pub fn sections(&self) -> &[Section] {
		&self.sections
	}

	#[must_use]
	pub fn section_entries(&self, section: &Section) -> &[CompositeEntry] {
		&self.entries[section.start..section.start + section.len]
	}

	fn push_section(&mut self, kind: SectionKind, payloads: impl IntoIterator<Item = EntryPayload>) {
		let start = self.entries.len();
		for (position, payload) in payloads.into_iter().enumerate() {
			self.entries.push(CompositeEntry {
				index: start + position,
				position,
				payload,
			});
		}
		let len = self.entries.len() - start;
		if len > 0 {
			self.sections.push(Section { kind, start, len });
		}
	}
}

/// Everything the compositor reads. `results` is `None` while a query is
/// pending, failed, or was never sent.
#[derive(Debug, Clone, Copy)]
pub struct CompositeInputs<'a> {
	pub text: &'a str,
	pub suggestions: &'a [Suggestion],
	pub results: Option<&'a [ResultItem]>,
	pub history: &'a [HistoryEntry],
	pub trending: &'a [TrendingEntry],
	pub max_results: usize,
}

#[must_use]
pub fn compose(inputs: CompositeInputs<'_>) -> CompositeList {
	let mut list = CompositeList::default();
	for kind in SectionKind::ORDER {
		match kind {
			SectionKind::Suggestions => list.push_section(
				kind,
				inputs.suggestions.iter().cloned().map(EntryPayload::Suggestion),
			),
			SectionKind::Results => list.push_section(
				kind,
				inputs
					.results
					.unwrap_or_default()
					.iter()
					.take(inputs.max_results)
					.cloned()
					.map(EntryPayload::Result),
			),
			SectionKind::History => list.push_section(
				kind,
				inputs.history.iter().cloned().map(EntryPayload::History),
			),
			SectionKind::Trending if inputs.text.trim().is_empty() => list.push_section(
				kind,
				inputs.trending.iter().cloned().map(EntryPayload::Trending),
			),
			SectionKind::Trending => {}
		}
	}
	list
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::results::ResultKind;
	use crate::engine::suggest::generate;
	use chrono::Utc;

	fn results(n: usize) -> Vec<ResultItem> {
		(0..n)
			.map(|i| ResultItem::new(format!("r{i}"), ResultKind::Article, format!("Result {i}")))
			.collect()
	}

	fn inputs<'a>(
		text: &'a str,
		suggestions: &'a [Suggestion],
		results: Option<&'a [ResultItem]>,
		history: &'a [HistoryEntry],
		trending: &'a [TrendingEntry],
	) -> CompositeInputs<'a> {
		CompositeInputs {
			text,
			suggestions,
			results,
			history,
			trending,
			max_results: 8,
		}
	}

	#[test]
	fn flat_indices_are_cumulative_section_offsets() {
		let suggestions = generate("python error fix");
		let results = results(2);
		let history = vec![HistoryEntry::new("rust traits", Utc::now())];
		let trending = vec![TrendingEntry::new("wasm")];

		let list = compose(inputs(
			"python error fix",
			&suggestions,
			Some(results.as_slice()),
			&history,
			&trending,
		));

		let kinds: Vec<_> = list.sections().iter().map(|s| (s.kind, s.start, s.len)).collect();
		assert_eq!(
			kinds,
			vec![
				(SectionKind::Suggestions, 0, 3),
				(SectionKind::Results, 3, 2),
				(SectionKind::History, 5, 1),
			]
		);
		for (expected, entry) in list.entries().iter().enumerate() {
			assert_eq!(entry.index, expected);
		}
		assert_eq!(list.get(4).unwrap().position, 1);
		assert_eq!(list.get(5).unwrap().executable_text(), "rust traits");
	}

	#[test]
	fn trending_only_for_empty_text() {
		let trending = vec![TrendingEntry::new("wasm"), TrendingEntry::new("zig")];
		let empty = compose(inputs("  ", &[], None, &[], &trending));
		assert_eq!(empty.len(), 2);
		assert_eq!(empty.sections()[0].kind, SectionKind::Trending);

		let typed = compose(inputs("zi", &[], None, &[], &trending));
		assert!(typed.is_empty());
	}

	#[test]
	fn results_section_is_capped() {
		let results = results(20);
		let mut capped = inputs("rust", &[], Some(results.as_slice()), &[], &[]);
		capped.max_results = 3;
		let list = compose(capped);
		assert_eq!(list.len(), 3);
		assert_eq!(list.section_entries(&list.sections()[0])[2].label(), "Result 2");
	}

	#[test]
	fn suggestion_entries_execute_their_query() {
		let suggestions = generate("learn rust tokio");
		let list = compose(inputs("learn rust tokio", &suggestions, None, &[], &[]));
		assert_eq!(list.get(0).unwrap().executable_text(), "rust best practices");
		assert_eq!(list.get(0).unwrap().label(), "Rust best practices");
	}
}
