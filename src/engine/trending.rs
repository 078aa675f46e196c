use serde::{Deserialize, Serialize};

/// A served, read-only trending search. Only shown while the input is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
	pub text: String,
}

impl TrendingEntry {
	pub fn new(text: impl Into<String>) -> Self {
		Self { text: text.into() }
	}
}

/// Trending list used when the configuration does not provide one.
pub const DEFAULT_TRENDING: &[&str] = &[
	"rust async patterns",
	"react server components",
	"python type hints",
	"kubernetes operators",
	"system design interview",
];

#[must_use]
pub fn default_trending() -> Vec<TrendingEntry> {
	DEFAULT_TRENDING.iter().map(|text| TrendingEntry::new(*text)).collect()
}

/// Build a trending list from configured strings, dropping blanks.
#[must_use]
pub fn from_texts<I, T>(texts: I) -> Vec<TrendingEntry>
where
	I: IntoIterator<Item = T>,
	T: AsRef<str>,
{
	texts
		.into_iter()
		.map(|text| text.as_ref().trim().to_string())
		.filter(|text| !text.is_empty())
		.map(TrendingEntry::new)
		.collect()
}
