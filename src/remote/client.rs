use std::future::Future;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::engine::query::Query;
use crate::engine::results::ResultItem;
use crate::error::SearchError;

/// Transport used by [`SearchRuntime`](super::SearchRuntime).
///
/// Implementations resolve exactly once per call. They are free to take as
/// long as they like; ordering is enforced by the caller's sequence gate.
pub trait SearchApi: Send + Sync + 'static {
	fn search(
		&self,
		query: &Query,
	) -> impl Future<Output = Result<Vec<ResultItem>, SearchError>> + Send;
}

#[derive(Debug, Deserialize)]
struct SearchResponseBody {
	#[serde(default)]
	results: Vec<ResultItem>,
}

/// `GET {base}/search?q=...&contentType=...&language=...&dateRange=...&level=...`
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
	http: Client,
	endpoint: Url,
}

impl HttpSearchClient {
	pub fn new(config: &ApiConfig) -> Result<Self, SearchError> {
		let endpoint = search_endpoint(&config.base_url)?;
		let http = Client::builder()
			.timeout(config.timeout)
			.user_agent(concat!("seekr/", env!("CARGO_PKG_VERSION")))
			.build()
			.map_err(|err| SearchError::Transport(err.to_string()))?;
		Ok(Self { http, endpoint })
	}

	#[must_use]
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}
}

impl SearchApi for HttpSearchClient {
	async fn search(&self, query: &Query) -> Result<Vec<ResultItem>, SearchError> {
		let mut params = vec![("q", query.text())];
		params.extend(query.filters().query_pairs());

		log::trace!("GET {} (sequence {})", self.endpoint, query.sequence());
		let response = self
			.http
			.get(self.endpoint.clone())
			.query(&params)
			.send()
			.await
			.map_err(|err| SearchError::Transport(err.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(SearchError::Status {
				status: status.as_u16(),
			});
		}

		let body = response
			.text()
			.await
			.map_err(|err| SearchError::Transport(err.to_string()))?;
		let decoded: SearchResponseBody =
			serde_json::from_str(&body).map_err(|err| SearchError::Decode(err.to_string()))?;
		Ok(decoded.results)
	}
}

fn search_endpoint(base_url: &str) -> Result<Url, SearchError> {
	let trimmed = base_url.trim();
	let with_slash = if trimmed.ends_with('/') {
		trimmed.to_string()
	} else {
		format!("{trimmed}/")
	};
	Url::parse(&with_slash)
		.and_then(|base| base.join("search"))
		.map_err(|_| SearchError::InvalidBaseUrl(base_url.to_string()))
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use mockito::{Matcher, Server};

	use super::*;
	use crate::engine::filters::{Facet, FilterSet};
	use crate::engine::results::ResultKind;

	fn client_for(base_url: String) -> HttpSearchClient {
		HttpSearchClient::new(&ApiConfig {
			base_url,
			timeout: Duration::from_secs(2),
		})
		.expect("client")
	}

	#[test]
	fn endpoint_keeps_base_path() {
		let client = client_for("https://content.example/api/v1".to_string());
		assert_eq!(client.endpoint().as_str(), "https://content.example/api/v1/search");
	}

	#[test]
	fn rejects_unparseable_base() {
		let err = HttpSearchClient::new(&ApiConfig {
			base_url: "not a url".to_string(),
			timeout: Duration::from_secs(1),
		})
		.unwrap_err();
		assert_eq!(err, SearchError::InvalidBaseUrl("not a url".to_string()));
	}

	#[tokio::test]
	async fn sends_text_and_present_filters() {
		let mut server = Server::new_async().await;
		let mock = server
			.mock("GET", "/search")
			.match_query(Matcher::AllOf(vec![
				Matcher::UrlEncoded("q".into(), "rust async".into()),
				Matcher::UrlEncoded("level".into(), "advanced".into()),
			]))
			.with_status(200)
			.with_header("content-type", "application/json")
			.with_body(
				r#"{"results":[{"id":1,"kind":"article","title":"Async Rust","excerpt":"Futures explained"}]}"#,
			)
			.create_async()
			.await;

		let client = client_for(server.url());
		let filters = FilterSet::new().with(Facet::Level, "advanced");
		let results = client
			.search(&Query::new("rust async", filters, 1))
			.await
			.expect("results");

		mock.assert_async().await;
		assert_eq!(
			results,
			vec![
				ResultItem::new("1", ResultKind::Article, "Async Rust")
					.with_excerpt("Futures explained")
			]
		);
	}

	#[tokio::test]
	async fn server_errors_surface_as_status() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", "/search")
			.match_query(Matcher::Any)
			.with_status(502)
			.create_async()
			.await;

		let client = client_for(server.url());
		let err = client
			.search(&Query::new("go", FilterSet::new(), 1))
			.await
			.unwrap_err();
		assert_eq!(err, SearchError::Status { status: 502 });
	}

	#[tokio::test]
	async fn malformed_body_is_a_decode_error() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", "/search")
			.match_query(Matcher::Any)
			.with_status(200)
			.with_body("<html>oops</html>")
			.create_async()
			.await;

		let client = client_for(server.url());
		let err = client
			.search(&Query::new("go", FilterSet::new(), 1))
			.await
			.unwrap_err();
		assert!(matches!(err, SearchError::Decode(_)));
	}

	#[tokio::test]
	async fn missing_results_key_means_empty() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", "/search")
			.match_query(Matcher::Any)
			.with_status(200)
			.with_body("{}")
			.create_async()
			.await;

		let client = client_for(server.url());
		let results = client
			.search(&Query::new("go", FilterSet::new(), 1))
			.await
			.unwrap();
		assert!(results.is_empty());
	}

	#[tokio::test]
	async fn null_excerpt_does_not_fail_the_whole_reply() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", "/search")
			.match_query(Matcher::Any)
			.with_status(200)
			.with_body(
				r#"{"results":[{"id":1.5,"title":"Slices","excerpt":null},{"id":"b","title":"Traits","excerpt":"Shared behaviour"}]}"#,
			)
			.create_async()
			.await;

		let client = client_for(server.url());
		let results = client
			.search(&Query::new("rust", FilterSet::new(), 1))
			.await
			.expect("results");
		assert_eq!(
			results,
			vec![
				ResultItem::new("1.5", ResultKind::Generic, "Slices"),
				ResultItem::new("b", ResultKind::Generic, "Traits").with_excerpt("Shared behaviour"),
			]
		);
	}
}
