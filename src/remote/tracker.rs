//! Sequence gate deciding which response may touch the visible results.

use log::debug;

use crate::engine::filters::FilterSet;
use crate::engine::query::Query;
use crate::engine::results::ResultItem;
use crate::error::SearchError;

/// Visible state of the remote results section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RemoteState {
	#[default]
	Idle,
	Pending {
		sequence: u64,
	},
	Success(Vec<ResultItem>),
	Empty,
	Failed {
		reason: String,
	},
}

/// Whether a response was allowed to update the visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
	Applied,
	Discarded,
}

/// Tracks the latest dispatched sequence and the state it produced.
///
/// Responses are applied only when their sequence equals the latest requested
/// one, regardless of arrival order. Transport is never cancelled; stale
/// completions are dropped here instead.
#[derive(Debug, Default)]
pub struct ResultTracker {
	last_sequence: u64,
	latest: Option<u64>,
	state: RemoteState,
}

impl ResultTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build the next query, record it as the latest and mark results pending.
	pub fn dispatch(&mut self, text: &str, filters: &FilterSet) -> Query {
		self.last_sequence = self.last_sequence.saturating_add(1);
		let sequence = self.last_sequence;
		self.latest = Some(sequence);
		self.state = RemoteState::Pending { sequence };
		Query::new(text, filters.clone(), sequence)
	}

	/// Forget the latest query so nothing in flight can land.
	pub fn invalidate(&mut self) {
		self.latest = None;
		self.state = RemoteState::Idle;
	}

	#[must_use]
	pub fn matches_latest(&self, sequence: u64) -> bool {
		self.latest == Some(sequence)
	}

	pub fn apply(&mut self, sequence: u64, outcome: Result<Vec<ResultItem>, SearchError>) -> Applied {
		if !self.matches_latest(sequence) {
			debug!(
				"discarding stale search response {sequence} (latest: {:?})",
				self.latest
			);
			return Applied::Discarded;
		}

		self.state = match outcome {
			Ok(items) if items.is_empty() => RemoteState::Empty,
			Ok(items) => RemoteState::Success(items),
			Err(err) => {
				log::warn!("search request {sequence} failed: {err}");
				RemoteState::Failed {
					reason: err.reason(),
				}
			}
		};
		Applied::Applied
	}

	/// Hide an inline error without touching anything else.
	pub fn dismiss_error(&mut self) {
		if matches!(self.state, RemoteState::Failed { .. }) {
			self.state = RemoteState::Idle;
		}
	}

	#[must_use]
	pub fn state(&self) -> &RemoteState {
		&self.state
	}

	/// Items to show, only once a success has been applied.
	#[must_use]
	pub fn results(&self) -> Option<&[ResultItem]> {
		match &self.state {
			RemoteState::Success(items) => Some(items),
			_ => None,
		}
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		matches!(self.state, RemoteState::Pending { .. })
	}

	#[must_use]
	pub fn error(&self) -> Option<&str> {
		match &self.state {
			RemoteState::Failed { reason } => Some(reason),
			_ => None,
		}
	}

	#[must_use]
	pub fn latest(&self) -> Option<u64> {
		self.latest
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::filters::Facet;
	use crate::engine::results::ResultKind;

	fn item(title: &str) -> ResultItem {
		ResultItem::new(title, ResultKind::Article, title)
	}

	#[test]
	fn sequences_increase_from_one() {
		let mut tracker = ResultTracker::new();
		let first = tracker.dispatch("java", &FilterSet::new());
		let second = tracker.dispatch("javascript", &FilterSet::new());
		assert_eq!((first.sequence(), second.sequence()), (1, 2));
		assert!(tracker.is_pending());
	}

	#[test]
	fn late_response_for_older_query_is_discarded() {
		let mut tracker = ResultTracker::new();
		let first = tracker.dispatch("java", &FilterSet::new());
		let second = tracker.dispatch("javascript", &FilterSet::new());

		let applied = tracker.apply(second.sequence(), Ok(vec![item("JS closures")]));
		assert_eq!(applied, Applied::Applied);

		let stale = tracker.apply(first.sequence(), Ok(vec![item("Java streams")]));
		assert_eq!(stale, Applied::Discarded);
		assert_eq!(tracker.results().unwrap(), &[item("JS closures")]);
	}

	#[test]
	fn older_response_arriving_first_never_shows() {
		let mut tracker = ResultTracker::new();
		let first = tracker.dispatch("java", &FilterSet::new());
		let _second = tracker.dispatch("javascript", &FilterSet::new());

		assert_eq!(
			tracker.apply(first.sequence(), Ok(vec![item("Java streams")])),
			Applied::Discarded
		);
		assert!(tracker.is_pending());
		assert!(tracker.results().is_none());
	}

	#[test]
	fn invalidation_blocks_in_flight_responses() {
		let mut tracker = ResultTracker::new();
		let query = tracker.dispatch("rust", &FilterSet::new());
		tracker.invalidate();
		assert_eq!(
			tracker.apply(query.sequence(), Ok(vec![item("Ownership")])),
			Applied::Discarded
		);
		assert_eq!(tracker.state(), &RemoteState::Idle);
	}

	#[test]
	fn empty_and_failed_outcomes() {
		let mut tracker = ResultTracker::new();
		let query = tracker.dispatch("zig", &FilterSet::new());
		tracker.apply(query.sequence(), Ok(Vec::new()));
		assert_eq!(tracker.state(), &RemoteState::Empty);

		let query = tracker.dispatch("zig comptime", &FilterSet::new());
		tracker.apply(query.sequence(), Err(SearchError::Status { status: 500 }));
		assert!(tracker.error().unwrap().contains("500"));

		tracker.dismiss_error();
		assert_eq!(tracker.state(), &RemoteState::Idle);
	}

	#[test]
	fn dispatched_query_snapshots_filters() {
		let mut tracker = ResultTracker::new();
		let mut filters = FilterSet::new().with(Facet::DateRange, "week");
		let query = tracker.dispatch("graphql", &filters);
		filters.clear();
		assert_eq!(query.filters().get(Facet::DateRange), Some("week"));
	}
}
