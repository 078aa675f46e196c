mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::SearchWorkflow;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	let cli = parse_cli();
	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	if cli.clear_history {
		workflow::clear_history(&resolved);
		println!("Cleared recent searches in {}", resolved.data_dir.display());
		return Ok(());
	}

	run_search(cli.output, resolved).await
}

/// Execute the search workflow and print output in the chosen format.
async fn run_search(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let workflow = SearchWorkflow::from_config(&settings)?;
	let outcome = workflow.run().await?;

	match format {
		OutputFormat::Plain => print_plain(&outcome, &settings.navigation),
		OutputFormat::Json => print_json(&outcome, &settings.navigation)?,
	}

	Ok(())
}
