use serde::Serialize;

use super::filters::FilterSet;

/// Navigation request emitted when a search is executed.
///
/// The engine never renders result pages itself; the host turns this into a
/// visit to its results view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteIntent {
	pub query: String,
	pub filters: FilterSet,
}

impl ExecuteIntent {
	pub fn new(query: impl Into<String>, filters: FilterSet) -> Self {
		Self {
			query: query.into(),
			filters,
		}
	}

	/// Results-view URL: `{base}{path}?q=...` followed by the active facets.
	#[must_use]
	pub fn results_url(&self, base: &str, path: &str) -> String {
		let base = base.trim_end_matches('/');
		let path = if path.starts_with('/') {
			path.to_string()
		} else {
			format!("/{path}")
		};
		let mut url = format!("{base}{path}?q={}", urlencoding::encode(&self.query));
		for (param, value) in self.filters.query_pairs() {
			url.push('&');
			url.push_str(param);
			url.push('=');
			url.push_str(&urlencoding::encode(value));
		}
		url
	}
}
