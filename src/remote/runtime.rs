use std::sync::Arc;

use log::{debug, warn};
use tokio::task::JoinSet;

use super::client::SearchApi;
use crate::engine::query::Query;
use crate::engine::results::ResultItem;
use crate::error::SearchError;

/// Completion of one dispatched query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
	pub sequence: u64,
	pub outcome: Result<Vec<ResultItem>, SearchError>,
}

/// Runs search requests as tasks on the current tokio runtime.
///
/// Requests may overlap; every one of them completes and is handed back
/// through [`SearchRuntime::next_response`]. Deciding whether a completion is
/// still wanted is the caller's job. Dropping the runtime aborts whatever is
/// still in flight.
pub struct SearchRuntime<C> {
	client: Arc<C>,
	tasks: JoinSet<SearchResponse>,
	issued: u64,
}

impl<C: SearchApi> SearchRuntime<C> {
	pub fn new(client: C) -> Self {
		Self {
			client: Arc::new(client),
			tasks: JoinSet::new(),
			issued: 0,
		}
	}

	pub fn issue_search(&mut self, query: Query) {
		let client = Arc::clone(&self.client);
		self.issued = self.issued.saturating_add(1);
		debug!(
			"dispatching search {} for {:?}",
			query.sequence(),
			query.text()
		);
		self.tasks.spawn(async move {
			let outcome = client.search(&query).await;
			SearchResponse {
				sequence: query.sequence(),
				outcome,
			}
		});
	}

	#[must_use]
	pub fn has_in_flight(&self) -> bool {
		!self.tasks.is_empty()
	}

	#[must_use]
	pub fn in_flight(&self) -> usize {
		self.tasks.len()
	}

	/// Total number of requests issued over the runtime's lifetime.
	#[must_use]
	pub fn issued(&self) -> u64 {
		self.issued
	}

	/// Wait for the next completed request, in arrival order.
	///
	/// Returns `None` once nothing is in flight.
	pub async fn next_response(&mut self) -> Option<SearchResponse> {
		loop {
			match self.tasks.join_next().await? {
				Ok(response) => return Some(response),
				Err(err) => warn!("search task ended without a response: {err}"),
			}
		}
	}

	#[must_use]
	pub fn client(&self) -> &C {
		&self.client
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use std::collections::HashMap;
	use std::sync::Mutex;
	use std::time::Duration;

	use super::*;
	use crate::engine::filters::FilterSet;
	use crate::engine::results::ResultKind;
	use crate::remote::tracker::{Applied, ResultTracker};

	/// Answers every query with one item titled after the query text, after a
	/// per-text delay.
	#[derive(Default)]
	pub(crate) struct ScriptedApi {
		delays: HashMap<String, Duration>,
		failures: Vec<String>,
		calls: Mutex<Vec<String>>,
	}

	impl ScriptedApi {
		pub(crate) fn delay(mut self, text: &str, delay: Duration) -> Self {
			self.delays.insert(text.to_string(), delay);
			self
		}

		pub(crate) fn fail(mut self, text: &str) -> Self {
			self.failures.push(text.to_string());
			self
		}

		pub(crate) fn calls(&self) -> Vec<String> {
			self.calls.lock().unwrap().clone()
		}
	}

	impl SearchApi for ScriptedApi {
		async fn search(&self, query: &Query) -> Result<Vec<ResultItem>, SearchError> {
			self.calls.lock().unwrap().push(query.text().to_string());
			let delay = self
				.delays
				.get(query.text())
				.copied()
				.unwrap_or(Duration::from_millis(10));
			tokio::time::sleep(delay).await;
			if self.failures.iter().any(|text| text == query.text()) {
				return Err(SearchError::Transport("connection reset".to_string()));
			}
			Ok(vec![ResultItem::new(
				format!("id-{}", query.sequence()),
				ResultKind::Article,
				query.text(),
			)])
		}
	}

	#[tokio::test(start_paused = true)]
	async fn responses_arrive_in_completion_order() {
		let api = ScriptedApi::default()
			.delay("java", Duration::from_millis(500))
			.delay("javascript", Duration::from_millis(100));
		let mut runtime = SearchRuntime::new(api);
		let mut tracker = ResultTracker::new();

		runtime.issue_search(tracker.dispatch("java", &FilterSet::new()));
		runtime.issue_search(tracker.dispatch("javascript", &FilterSet::new()));
		assert_eq!(runtime.in_flight(), 2);

		let first = runtime.next_response().await.unwrap();
		assert_eq!(first.sequence, 2);
		assert_eq!(tracker.apply(first.sequence, first.outcome), Applied::Applied);

		let second = runtime.next_response().await.unwrap();
		assert_eq!(second.sequence, 1);
		assert_eq!(tracker.apply(second.sequence, second.outcome), Applied::Discarded);

		let titles: Vec<_> = tracker.results().unwrap().iter().map(|i| i.title.as_str()).collect();
		assert_eq!(titles, vec!["javascript"]);
		assert!(runtime.next_response().await.is_none());
		assert_eq!(runtime.client().calls(), vec!["java", "javascript"]);
	}

	#[tokio::test(start_paused = true)]
	async fn failures_come_back_as_errors() {
		let mut runtime = SearchRuntime::new(ScriptedApi::default().fail("rust"));
		let mut tracker = ResultTracker::new();
		runtime.issue_search(tracker.dispatch("rust", &FilterSet::new()));

		let response = runtime.next_response().await.unwrap();
		assert!(response.outcome.is_err());
		tracker.apply(response.sequence, response.outcome);
		assert!(tracker.error().is_some());
	}
}
