use anyhow::{Context, Result};
use log::info;
use seekr::{
	App, FileSlotStore, HISTORY_SLOT, HistoryStore, HttpSearchClient, SearchOutcome,
	SearchSession, logging,
};

use crate::settings::ResolvedConfig;

/// Coordinates building and running the interactive search experience.
pub(crate) struct SearchWorkflow {
	app: App<HttpSearchClient, FileSlotStore>,
}

impl SearchWorkflow {
	/// Must be called within the tokio runtime that later runs the workflow.
	pub(crate) fn from_config(config: &ResolvedConfig) -> Result<Self> {
		logging::initialize(config.log_level);

		let client = HttpSearchClient::new(&config.api).context("invalid search API settings")?;
		info!("search endpoint {}", client.endpoint());

		let session = SearchSession::new(open_history(config), &config.engine)
			.with_filters(config.filters.clone());
		let app = App::new(session, client, config.engine.debounce)
			.with_initial_query(&config.initial_query);
		Ok(Self { app })
	}

	pub(crate) async fn run(self) -> Result<SearchOutcome> {
		seekr::run(self.app).await
	}
}

fn open_history(config: &ResolvedConfig) -> HistoryStore<FileSlotStore> {
	let store = FileSlotStore::new(&config.data_dir);
	HistoryStore::load(store, HISTORY_SLOT, config.engine.history_capacity)
}

/// Forget every recent search.
pub(crate) fn clear_history(config: &ResolvedConfig) {
	open_history(config).clear();
}
