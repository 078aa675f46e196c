use super::filters::FilterSet;

/// Minimum trimmed length before a query is sent to the search API.
pub const MIN_REMOTE_QUERY_CHARS: usize = 2;

/// A query as dispatched to the remote search client.
///
/// Built once at dispatch time and never mutated afterwards; `filters` is a
/// snapshot of the session's filter set at that moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
	text: String,
	filters: FilterSet,
	sequence: u64,
}

impl Query {
	pub fn new(text: impl Into<String>, filters: FilterSet, sequence: u64) -> Self {
		Self {
			text: text.into(),
			filters,
			sequence,
		}
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
	pub fn sequence(&self) -> u64 {
		self.sequence
	}
}

/// Whether `text` is long enough to reach the network.
#[must_use]
pub fn is_remote_eligible(text: &str) -> bool {
	text.trim().chars().count() >= MIN_REMOTE_QUERY_CHARS
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::filters::Facet;

	#[test]
	fn filter_snapshot_is_independent_of_later_edits() {
		let mut filters = FilterSet::new().with(Facet::Language, "python");
		let query = Query::new("decorators", filters.clone(), 7);
		filters.set(Facet::Language, Some("rust"));

		assert_eq!(query.filters().get(Facet::Language), Some("python"));
		assert_eq!(query.sequence(), 7);
	}

	#[test]
	fn eligibility_counts_trimmed_characters() {
		assert!(!is_remote_eligible(" a "));
		assert!(is_remote_eligible("go"));
		assert!(is_remote_eligible("é!"));
	}
}
