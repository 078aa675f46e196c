use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail, ensure};
use config::{Config, ConfigError, File};
use log::LevelFilter;
use serde::Deserialize;

use seekr::config::{ApiConfig, EngineConfig, NavigationConfig};
use seekr::engine::trending;
use seekr::{Facet, FilterSet, app_dirs};

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	api: ApiSection,
	search: SearchSection,
	navigation: NavigationSection,
	filters: FiltersSection,
	storage: StorageSection,
	logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiSection {
	base_url: Option<String>,
	timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	initial_query: Option<String>,
	debounce_ms: Option<u64>,
	max_results: Option<usize>,
	history_capacity: Option<usize>,
	trending: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct NavigationSection {
	results_base: Option<String>,
	results_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FiltersSection {
	content_type: Option<String>,
	language: Option<String>,
	date_range: Option<String>,
	level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StorageSection {
	data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
	level: Option<String>,
}

pub struct ResolvedConfig {
	pub api: ApiConfig,
	pub engine: EngineConfig,
	pub navigation: NavigationConfig,
	pub filters: FilterSet,
	pub data_dir: PathBuf,
	pub initial_query: String,
	pub log_level: LevelFilter,
}

impl ResolvedConfig {
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  API base URL: {}", self.api.base_url);
		println!("  Request timeout: {} ms", self.api.timeout.as_millis());
		println!("  Debounce: {} ms", self.engine.debounce.as_millis());
		println!("  Max results: {}", self.engine.max_results);
		println!("  History capacity: {}", self.engine.history_capacity);
		let trending: Vec<_> = self
			.engine
			.trending
			.iter()
			.map(|entry| entry.text.as_str())
			.collect();
		if trending.is_empty() {
			println!("  Trending: (none)");
		} else {
			println!("  Trending: {}", trending.join(", "));
		}
		println!(
			"  Results view: {}{}",
			self.navigation.results_base, self.navigation.results_path
		);
		if self.filters.is_empty() {
			println!("  Filters: (none)");
		} else {
			println!("  Filters: {}", self.filters.summary());
		}
		println!("  Data directory: {}", self.data_dir.display());
		println!("  Log level: {}", self.log_level);
		if !self.initial_query.is_empty() {
			println!("  Initial query: {}", self.initial_query);
		}
	}
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("seekr")
			.separator("__")
			.try_parsing(true)
			.list_separator(",")
			.with_list_parse_key("search.trending"),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".seekr.toml"));
		files.push(current_dir.join("seekr.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(query) = cli.query.clone() {
			self.search.initial_query = Some(query);
		}
		if let Some(url) = cli.api_url.clone() {
			self.api.base_url = Some(url);
		}
		if let Some(base) = cli.results_base.clone() {
			self.navigation.results_base = Some(base);
		}
		if let Some(value) = cli.debounce_ms {
			self.search.debounce_ms = Some(value);
		}
		if let Some(value) = cli.max_results {
			self.search.max_results = Some(value);
		}
		if let Some(level) = cli.log_level {
			self.logging.level = Some(level.as_str().to_string());
		}
		for (facet, value) in &cli.filters {
			*self.filters.slot(*facet) = Some(value.clone());
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		let defaults = ApiConfig::default();
		let timeout = self
			.api
			.timeout_ms
			.map(Duration::from_millis)
			.unwrap_or(defaults.timeout);
		ensure!(!timeout.is_zero(), "api.timeout_ms must be greater than zero");
		let api = ApiConfig {
			base_url: non_blank(self.api.base_url).unwrap_or(defaults.base_url),
			timeout,
		};

		let mut engine = EngineConfig::default();
		if let Some(ms) = self.search.debounce_ms {
			engine.debounce = Duration::from_millis(ms);
		}
		if let Some(max) = self.search.max_results {
			ensure!(max > 0, "search.max_results must be at least 1");
			engine.max_results = max;
		}
		if let Some(capacity) = self.search.history_capacity {
			ensure!(capacity > 0, "search.history_capacity must be at least 1");
			engine.history_capacity = capacity;
		}
		if let Some(texts) = self.search.trending {
			engine.trending = trending::from_texts(texts);
		}

		let nav_defaults = NavigationConfig::default();
		let navigation = NavigationConfig {
			results_base: non_blank(self.navigation.results_base)
				.unwrap_or(nav_defaults.results_base),
			results_path: non_blank(self.navigation.results_path)
				.unwrap_or(nav_defaults.results_path),
		};

		let mut filters = FilterSet::new();
		for facet in Facet::ALL {
			let value = self.filters.value(facet);
			if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
				if !facet.options().contains(&value) {
					bail!(
						"unknown {} '{value}' (expected one of: {})",
						facet.label().to_ascii_lowercase(),
						facet.options().join(", ")
					);
				}
				filters.set(facet, Some(value));
			}
		}

		let data_dir = match self.storage.data_dir {
			Some(dir) => dir,
			None => app_dirs::get_data_dir().context("failed to resolve the data directory")?,
		};

		let log_level = match non_blank(self.logging.level) {
			Some(level) => level
				.parse::<LevelFilter>()
				.map_err(|_| anyhow!("unknown log level '{level}'"))?,
			None => LevelFilter::Info,
		};

		Ok(ResolvedConfig {
			api,
			engine,
			navigation,
			filters,
			data_dir,
			initial_query: self.search.initial_query.unwrap_or_default(),
			log_level,
		})
	}
}

impl FiltersSection {
	fn slot(&mut self, facet: Facet) -> &mut Option<String> {
		match facet {
			Facet::ContentType => &mut self.content_type,
			Facet::Language => &mut self.language,
			Facet::DateRange => &mut self.date_range,
			Facet::Level => &mut self.level,
		}
	}

	fn value(&self, facet: Facet) -> Option<&str> {
		match facet {
			Facet::ContentType => self.content_type.as_deref(),
			Facet::Language => self.language.as_deref(),
			Facet::DateRange => self.date_range.as_deref(),
			Facet::Level => self.level.as_deref(),
		}
	}
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.filter(|value| !value.trim().is_empty())
}
