use anyhow::Result;
use seekr::{NavigationConfig, SearchOutcome};
use serde_json::json;

fn results_url(outcome: &SearchOutcome, navigation: &NavigationConfig) -> Option<String> {
	outcome
		.intent
		.as_ref()
		.map(|intent| intent.results_url(&navigation.results_base, &navigation.results_path))
}

/// Print the results-view URL, or a note when the search was cancelled.
pub(crate) fn print_plain(outcome: &SearchOutcome, navigation: &NavigationConfig) {
	match results_url(outcome, navigation) {
		Some(url) if outcome.accepted => println!("{url}"),
		_ => println!("Search cancelled (query: '{}')", outcome.query),
	}
}

/// Format the search outcome as a JSON string.
pub(crate) fn format_outcome_json(
	outcome: &SearchOutcome,
	navigation: &NavigationConfig,
) -> Result<String> {
	let filters = match &outcome.intent {
		Some(intent) => serde_json::to_value(&intent.filters)?,
		None => serde_json::Value::Null,
	};

	let payload = json!({
		"accepted": outcome.accepted,
		"query": outcome.query,
		"filters": filters,
		"url": results_url(outcome, navigation),
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the search outcome.
pub(crate) fn print_json(outcome: &SearchOutcome, navigation: &NavigationConfig) -> Result<()> {
	println!("{}", format_outcome_json(outcome, navigation)?);
	Ok(())
}
