//! Runtime configuration shared by the engine, the remote client and the UI.
//!
//! The binary builds these from layered settings; library users can start
//! from the defaults and override individual fields.

use std::time::Duration;

use crate::engine::history::DEFAULT_HISTORY_CAPACITY;
use crate::engine::trending::{TrendingEntry, default_trending};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_RESULTS_BASE: &str = "http://localhost:3000";
pub const DEFAULT_RESULTS_PATH: &str = "/search";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// Where and how to reach the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
	pub base_url: String,
	pub timeout: Duration,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_API_BASE_URL.to_string(),
			timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}
}

/// Tuning for the suggestion engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
	pub debounce: Duration,
	pub max_results: usize,
	pub history_capacity: usize,
	pub trending: Vec<TrendingEntry>,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			max_results: DEFAULT_MAX_RESULTS,
			history_capacity: DEFAULT_HISTORY_CAPACITY,
			trending: default_trending(),
		}
	}
}

/// Target of the outbound navigation intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationConfig {
	pub results_base: String,
	pub results_path: String,
}

impl Default for NavigationConfig {
	fn default() -> Self {
		Self {
			results_base: DEFAULT_RESULTS_BASE.to_string(),
			results_path: DEFAULT_RESULTS_PATH.to_string(),
		}
	}
}
