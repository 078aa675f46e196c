use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named dimension that narrows remote search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
	ContentType,
	Language,
	DateRange,
	Level,
}

impl Facet {
	pub const ALL: [Facet; 4] = [
		Facet::ContentType,
		Facet::Language,
		Facet::DateRange,
		Facet::Level,
	];

	/// Query parameter name understood by the search API.
	#[must_use]
	pub fn param(self) -> &'static str {
		match self {
			Facet::ContentType => "contentType",
			Facet::Language => "language",
			Facet::DateRange => "dateRange",
			Facet::Level => "level",
		}
	}

	#[must_use]
	pub fn label(self) -> &'static str {
		match self {
			Facet::ContentType => "Content type",
			Facet::Language => "Language",
			Facet::DateRange => "Date range",
			Facet::Level => "Level",
		}
	}

	/// Values offered by the filter palette for this facet.
	#[must_use]
	pub fn options(self) -> &'static [&'static str] {
		match self {
			Facet::ContentType => &["article", "snippet", "tutorial", "discussion"],
			Facet::Language => &["javascript", "typescript", "python", "rust", "go", "java"],
			Facet::DateRange => &["day", "week", "month", "year"],
			Facet::Level => &["beginner", "intermediate", "advanced"],
		}
	}
}

impl fmt::Display for Facet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.param())
	}
}

impl FromStr for Facet {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let normalized: String = value
			.trim()
			.chars()
			.filter(|ch| *ch != '_' && *ch != '-')
			.collect::<String>()
			.to_ascii_lowercase();
		match normalized.as_str() {
			"contenttype" | "type" => Ok(Facet::ContentType),
			"language" | "lang" => Ok(Facet::Language),
			"daterange" | "date" => Ok(Facet::DateRange),
			"level" => Ok(Facet::Level),
			_ => Err(format!("unknown filter '{value}'")),
		}
	}
}

/// The current filter selection. A missing facet means "unfiltered".
///
/// Queries take a clone of the set when they are built, so later edits never
/// reach a request that is already in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
	values: BTreeMap<Facet, String>,
}

impl FilterSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set or clear a facet. Blank values clear it.
	pub fn set(&mut self, facet: Facet, value: Option<impl Into<String>>) {
		match value.map(Into::into) {
			Some(value) if !value.trim().is_empty() => {
				self.values.insert(facet, value.trim().to_string());
			}
			_ => {
				self.values.remove(&facet);
			}
		}
	}

	#[must_use]
	pub fn with(mut self, facet: Facet, value: impl Into<String>) -> Self {
		self.set(facet, Some(value));
		self
	}

	#[must_use]
	pub fn get(&self, facet: Facet) -> Option<&str> {
		self.values.get(&facet).map(String::as_str)
	}

	pub fn clear(&mut self) {
		self.values.clear();
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (Facet, &str)> {
		self.values.iter().map(|(facet, value)| (*facet, value.as_str()))
	}

	/// `(param, value)` pairs in a stable facet order.
	#[must_use]
	pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
		self.iter().map(|(facet, value)| (facet.param(), value)).collect()
	}

	/// Step a facet through `unset -> options... -> unset`.
	pub fn cycle(&mut self, facet: Facet, forward: bool) {
		let options = facet.options();
		let position = self
			.get(facet)
			.and_then(|current| options.iter().position(|option| *option == current));
		let next = match (position, forward) {
			(None, true) => options.first(),
			(None, false) => options.last(),
			(Some(index), true) => options.get(index + 1),
			(Some(0), false) => None,
			(Some(index), false) => options.get(index - 1),
		};
		self.set(facet, next.copied());
	}

	/// Compact `facet=value` summary for status lines.
	#[must_use]
	pub fn summary(&self) -> String {
		self.iter()
			.map(|(facet, value)| format!("{facet}={value}"))
			.collect::<Vec<_>>()
			.join(" ")
	}
}
