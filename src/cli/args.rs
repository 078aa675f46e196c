use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use log::LevelFilter;
use seekr::{Facet, app_dirs};

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let data_dir = match app_dirs::get_data_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("seekr {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "data directory: {data_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

/// Parse `facet=value`. An empty value clears a facet set by configuration.
fn parse_filter(raw: &str) -> Result<(Facet, String), String> {
	let (facet, value) = raw
		.split_once('=')
		.ok_or_else(|| format!("expected FACET=VALUE, got '{raw}'"))?;
	Ok((facet.parse()?, value.trim().to_string()))
}

#[derive(Parser, Debug)]
#[command(
	name = "seekr",
	version,
	long_version = long_version(),
	about = "Search box with debounced suggestions, live results and recent searches",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "SEEKR_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Start with this text in the search box (default: empty)"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short = 'f',
		long = "filter",
		value_name = "FACET=VALUE",
		value_parser = parse_filter,
		action = ArgAction::Append,
		help = "Preset a filter: contentType, language, dateRange or level (default: none)"
	)]
	pub(crate) filters: Vec<(Facet, String)>,
	#[arg(
		long = "api-url",
		value_name = "URL",
		help = "Base URL of the search API (default: http://localhost:8080/api)"
	)]
	pub(crate) api_url: Option<String>,
	#[arg(
		long = "results-base",
		value_name = "URL",
		help = "Base URL of the results view (default: http://localhost:3000)"
	)]
	pub(crate) results_base: Option<String>,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		help = "Delay before a typed query is analysed and sent (default: 300)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long = "max-results",
		value_name = "NUM",
		help = "Maximum remote results shown (default: 8)"
	)]
	pub(crate) max_results: Option<usize>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		long = "clear-history",
		help = "Forget recent searches and exit (default: disabled)"
	)]
	pub(crate) clear_history: bool,
	#[arg(
		long = "log-level",
		value_enum,
		help = "Lowest level captured in the log pane (default: info)"
	)]
	pub(crate) log_level: Option<LogLevelArg>,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
	pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogLevelArg {
	Off,
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

impl LogLevelArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			LogLevelArg::Off => "off",
			LogLevelArg::Error => "error",
			LogLevelArg::Warn => "warn",
			LogLevelArg::Info => "info",
			LogLevelArg::Debug => "debug",
			LogLevelArg::Trace => "trace",
		}
	}
}

impl From<LogLevelArg> for LevelFilter {
	fn from(level: LogLevelArg) -> Self {
		match level {
			LogLevelArg::Off => LevelFilter::Off,
			LogLevelArg::Error => LevelFilter::Error,
			LogLevelArg::Warn => LevelFilter::Warn,
			LogLevelArg::Info => LevelFilter::Info,
			LogLevelArg::Debug => LevelFilter::Debug,
			LogLevelArg::Trace => LevelFilter::Trace,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
