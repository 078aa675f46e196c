use serde::{Deserialize, Deserializer, Serialize};

use super::suggest::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
	Article,
	Snippet,
	#[default]
	#[serde(other)]
	Generic,
}

impl ResultKind {
	#[must_use]
	pub fn icon(self) -> Icon {
		match self {
			ResultKind::Article => Icon::Article,
			ResultKind::Snippet => Icon::Snippet,
			ResultKind::Generic => Icon::Document,
		}
	}
}

/// One remote search hit. Lives only as long as the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	#[serde(default, alias = "type")]
	pub kind: ResultKind,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub title: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub excerpt: String,
}

impl ResultItem {
	pub fn new(id: impl Into<String>, kind: ResultKind, title: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			kind,
			title: title.into(),
			excerpt: String::new(),
		}
	}

	#[must_use]
	pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
		self.excerpt = excerpt.into();
		self
	}
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Id {
		Text(String),
		Number(serde_json::Number),
	}

	Ok(match Id::deserialize(deserializer)? {
		Id::Text(text) => text,
		Id::Number(number) => number.to_string(),
	})
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_numeric_ids_and_type_alias() {
		let item: ResultItem = serde_json::from_str(
			r#"{"id": 42, "type": "snippet", "title": "Debounce in Rust"}"#,
		)
		.unwrap();
		assert_eq!(item.id, "42");
		assert_eq!(item.kind, ResultKind::Snippet);
		assert!(item.excerpt.is_empty());
	}

	#[test]
	fn unknown_kinds_become_generic() {
		let item: ResultItem =
			serde_json::from_str(r#"{"id": "a", "kind": "video", "title": "Intro"}"#).unwrap();
		assert_eq!(item.kind, ResultKind::Generic);
	}

	#[test]
	fn null_or_missing_text_fields_decode_as_empty() {
		let item: ResultItem =
			serde_json::from_str(r#"{"id": "a", "kind": "article", "title": "T", "excerpt": null}"#)
				.unwrap();
		assert_eq!(item.title, "T");
		assert!(item.excerpt.is_empty());

		let item: ResultItem = serde_json::from_str(r#"{"id": "b", "title": null}"#).unwrap();
		assert!(item.title.is_empty());

		let item: ResultItem = serde_json::from_str(r#"{"id": "c"}"#).unwrap();
		assert!(item.title.is_empty());
	}

	#[test]
	fn fractional_ids_are_kept_as_text() {
		let item: ResultItem = serde_json::from_str(r#"{"id": 1.5, "title": "Half"}"#).unwrap();
		assert_eq!(item.id, "1.5");
	}
}
