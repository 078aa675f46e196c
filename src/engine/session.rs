//! The search surface's session object.
//!
//! [`SearchSession`] owns the text, filters, suggestions, remote state,
//! history and navigation for one mounted search surface. Every mutation
//! entry point re-derives the composite list explicitly before returning, so
//! readers always see a list consistent with the latest state.

use log::debug;

use super::composite::{CompositeInputs, CompositeList, compose};
use super::filters::{Facet, FilterSet};
use super::history::{HistoryEntry, HistoryStore};
use super::intent::ExecuteIntent;
use super::navigation::{ExecuteTarget, NavEvent, NavigationState};
use super::query::{Query, is_remote_eligible};
use super::results::ResultItem;
use super::suggest::{self, Suggestion};
use super::trending::TrendingEntry;
use crate::config::EngineConfig;
use crate::error::SearchError;
use crate::remote::{Applied, ResultTracker};
use crate::storage::SlotStore;

pub struct SearchSession<S> {
	text: String,
	filters: FilterSet,
	suggestions: Vec<Suggestion>,
	remote: ResultTracker,
	history: HistoryStore<S>,
	trending: Vec<TrendingEntry>,
	navigation: NavigationState,
	composite: CompositeList,
	max_results: usize,
}

impl<S: SlotStore> SearchSession<S> {
	pub fn new(history: HistoryStore<S>, config: &EngineConfig) -> Self {
		let mut session = Self {
			text: String::new(),
			filters: FilterSet::new(),
			suggestions: Vec::new(),
			remote: ResultTracker::new(),
			history,
			trending: config.trending.clone(),
			navigation: NavigationState::Closed,
			composite: CompositeList::default(),
			max_results: config.max_results,
		};
		session.refresh();
		session
	}

	#[must_use]
	pub fn with_filters(mut self, filters: FilterSet) -> Self {
		self.filters = filters;
		self
	}

	#[must_use]
	pub fn text(&self) -> &str {
		&self.text
	}

	#[must_use]
	pub fn filters(&self) -> &FilterSet {
		&self.filters
	}

	#[must_use]
	pub fn suggestions(&self) -> &[Suggestion] {
		&self.suggestions
	}

	#[must_use]
	pub fn remote(&self) -> &ResultTracker {
		&self.remote
	}

	#[must_use]
	pub fn history(&self) -> &[HistoryEntry] {
		self.history.entries()
	}

	#[must_use]
	pub fn navigation(&self) -> NavigationState {
		self.navigation
	}

	#[must_use]
	pub fn composite(&self) -> &CompositeList {
		&self.composite
	}

	/// Input text changed. Opens the list with nothing selected.
	///
	/// Suggestions and results keep showing the last settled text until the
	/// debouncer hands the new text to [`SearchSession::settle`].
	pub fn set_text(&mut self, text: impl Into<String>) {
		let text = text.into();
		if text == self.text {
			return;
		}
		self.text = text;
		self.navigation.apply(NavEvent::Typing, self.composite.len());
		self.refresh();
	}

	/// The debounced text settled: regenerate suggestions and, when the text
	/// is long enough, build the query the caller must dispatch.
	pub fn settle(&mut self, text: &str) -> Option<Query> {
		self.suggestions = suggest::generate(text);
		let query = if is_remote_eligible(text) {
			Some(self.remote.dispatch(text.trim(), &self.filters))
		} else {
			self.remote.invalidate();
			None
		};
		self.refresh();
		query
	}

	/// Feed a completed request back in. Stale sequences are discarded.
	pub fn apply_response(
		&mut self,
		sequence: u64,
		outcome: Result<Vec<ResultItem>, SearchError>,
	) -> Applied {
		let applied = self.remote.apply(sequence, outcome);
		if applied == Applied::Applied {
			self.refresh();
		}
		applied
	}

	/// Run a navigation event. Returns an intent when it executed a search.
	pub fn handle(&mut self, event: NavEvent) -> Option<ExecuteIntent> {
		let target = self.navigation.apply(event, self.composite.len())?;
		let text = match target {
			ExecuteTarget::Entry(index) => self
				.composite
				.get(index)
				.map(|entry| entry.executable_text().to_string())?,
			ExecuteTarget::RawText => self.text.clone(),
		};
		self.execute(&text)
	}

	/// Execute `text`. Blank text is a no-op: no intent, no history write.
	pub fn execute(&mut self, text: &str) -> Option<ExecuteIntent> {
		let resolved = text.trim();
		if resolved.is_empty() {
			return None;
		}

		debug!("executing search {resolved:?}");
		self.history.record(resolved);
		self.suggestions.clear();
		self.remote.invalidate();
		self.navigation.close();
		self.refresh();
		Some(ExecuteIntent::new(resolved, self.filters.clone()))
	}

	/// Change one facet. Only queries dispatched afterwards see the change.
	pub fn set_filter(&mut self, facet: Facet, value: Option<String>) {
		self.filters.set(facet, value);
	}

	pub fn cycle_filter(&mut self, facet: Facet, forward: bool) {
		self.filters.cycle(facet, forward);
	}

	pub fn clear_filters(&mut self) {
		self.filters.clear();
	}

	pub fn record_history(&mut self, text: &str) {
		self.history.record(text);
		self.refresh();
	}

	pub fn clear_history(&mut self) {
		self.history.clear();
		self.refresh();
	}

	pub fn dismiss_error(&mut self) {
		self.remote.dismiss_error();
		self.refresh();
	}

	/// Re-derive the composite list. A selected entry stays selected at its
	/// new index; when it is gone nothing is selected.
	fn refresh(&mut self) {
		let selected = self
			.navigation
			.active()
			.and_then(|index| self.composite.get(index))
			.map(|entry| entry.payload.clone());
		self.composite = compose(CompositeInputs {
			text: &self.text,
			suggestions: &self.suggestions,
			results: self.remote.results(),
			history: self.history.entries(),
			trending: &self.trending,
			max_results: self.max_results,
		});
		if let Some(payload) = selected {
			let active = self
				.composite
				.entries()
				.iter()
				.find(|entry| entry.payload == payload)
				.map(|entry| entry.index);
			self.navigation = NavigationState::Open { active };
		}
		self.navigation.fit(self.composite.len());
	}
}
