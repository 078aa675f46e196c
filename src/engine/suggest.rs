//! Heuristic query suggestions.
//!
//! [`generate`] is a pure function of the settled input text: it tokenizes the
//! query and matches the tokens against small fixed catalogs of programming
//! languages, frameworks and intent words. The same text always produces the
//! same ordered list.

/// Inputs shorter than this (after trimming) produce no suggestions.
pub const MIN_SUGGESTION_CHARS: usize = 3;
/// Operator hints need a little more context than the other heuristics.
pub const MIN_OPERATOR_HINT_CHARS: usize = 5;
/// Upper bound on the number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
	Language,
	ErrorContext,
	TutorialContext,
	TechContext,
	OperatorHint,
}

impl SuggestionKind {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			SuggestionKind::Language => "language",
			SuggestionKind::ErrorContext => "errorContext",
			SuggestionKind::TutorialContext => "tutorialContext",
			SuggestionKind::TechContext => "techContext",
			SuggestionKind::OperatorHint => "operatorHint",
		}
	}

	#[must_use]
	pub fn icon(self) -> Icon {
		match self {
			SuggestionKind::Language => Icon::Code,
			SuggestionKind::ErrorContext => Icon::Bug,
			SuggestionKind::TutorialContext => Icon::Book,
			SuggestionKind::TechContext => Icon::Layers,
			SuggestionKind::OperatorHint => Icon::Terminal,
		}
	}
}

/// Symbol shown next to a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
	Code,
	Bug,
	Book,
	Layers,
	Terminal,
	Article,
	Snippet,
	Document,
	Clock,
	Trending,
}

impl Icon {
	#[must_use]
	pub fn glyph(self) -> &'static str {
		match self {
			Icon::Code => "λ",
			Icon::Bug => "✗",
			Icon::Book => "≡",
			Icon::Layers => "◆",
			Icon::Terminal => "❯",
			Icon::Article => "¶",
			Icon::Snippet => "{}",
			Icon::Document => "•",
			Icon::Clock => "↺",
			Icon::Trending => "↗",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
	pub kind: SuggestionKind,
	pub label: String,
	pub executable_query: String,
	pub icon: Icon,
}

impl Suggestion {
	fn new(kind: SuggestionKind, label: String, executable_query: String) -> Self {
		Self {
			kind,
			label,
			executable_query,
			icon: kind.icon(),
		}
	}
}

type Catalog = &'static [(&'static [&'static str], &'static str)];

const LANGUAGES: Catalog = &[
	(&["javascript", "js"], "JavaScript"),
	(&["typescript", "ts"], "TypeScript"),
	(&["python", "py"], "Python"),
	(&["java"], "Java"),
	(&["rust", "rs"], "Rust"),
	(&["go", "golang"], "Go"),
	(&["c++", "cpp"], "C++"),
	(&["c#", "csharp"], "C#"),
	(&["ruby", "rb"], "Ruby"),
	(&["php"], "PHP"),
	(&["swift"], "Swift"),
	(&["kotlin", "kt"], "Kotlin"),
	(&["scala"], "Scala"),
	(&["elixir"], "Elixir"),
	(&["haskell"], "Haskell"),
	(&["sql"], "SQL"),
];

const TECHNOLOGIES: Catalog = &[
	(&["react", "reactjs"], "React"),
	(&["vue", "vuejs"], "Vue"),
	(&["angular"], "Angular"),
	(&["svelte"], "Svelte"),
	(&["next", "nextjs", "next.js"], "Next.js"),
	(&["node", "nodejs", "node.js"], "Node.js"),
	(&["express"], "Express"),
	(&["django"], "Django"),
	(&["flask"], "Flask"),
	(&["spring"], "Spring"),
	(&["rails"], "Rails"),
	(&["tokio"], "Tokio"),
	(&["docker"], "Docker"),
	(&["kubernetes", "k8s"], "Kubernetes"),
	(&["graphql"], "GraphQL"),
	(&["tailwind"], "Tailwind CSS"),
	(&["postgres", "postgresql"], "PostgreSQL"),
	(&["mongodb", "mongo"], "MongoDB"),
	(&["redis"], "Redis"),
	(&["aws"], "AWS"),
	(&["tensorflow"], "TensorFlow"),
	(&["pytorch"], "PyTorch"),
];

const PROBLEM_WORDS: &[&str] = &["error", "bug", "issue", "problem", "fix"];
const LEARNING_WORDS: &[&str] = &["learn", "tutorial", "guide", "how"];
const FUNCTION_CUES: &[&str] = &["function", "func", "fn", "def", "method"];
const CLASS_CUES: &[&str] = &["class", "struct", "interface", "component"];

/// Operator prefixes the search API understands. A query that already uses
/// one gets no operator hint.
pub const OPERATORS: &[&str] = &[
	"lang:",
	"type:",
	"tag:",
	"author:",
	"function:",
	"class:",
	"error:",
];

/// Produce the ordered suggestion list for a settled query.
#[must_use]
pub fn generate(text: &str) -> Vec<Suggestion> {
	let trimmed = text.trim();
	if trimmed.chars().count() < MIN_SUGGESTION_CHARS {
		return Vec::new();
	}

	let lowered = trimmed.to_lowercase();
	let tokens: Vec<&str> = lowered.split_whitespace().collect();
	let mut suggestions = Vec::new();

	if let Some(language) = first_match(&tokens, LANGUAGES) {
		let lower = language.to_lowercase();
		suggestions.push(Suggestion::new(
			SuggestionKind::Language,
			format!("{language} best practices"),
			format!("{lower} best practices"),
		));
		if intersects(&tokens, PROBLEM_WORDS) {
			suggestions.push(Suggestion::new(
				SuggestionKind::ErrorContext,
				format!("{language} common errors"),
				format!("{lower} common errors"),
			));
		}
		if intersects(&tokens, LEARNING_WORDS) {
			suggestions.push(Suggestion::new(
				SuggestionKind::TutorialContext,
				format!("{language} tutorials for beginners"),
				format!("{lower} tutorial"),
			));
		}
	}

	if let Some(tech) = first_match(&tokens, TECHNOLOGIES) {
		suggestions.push(Suggestion::new(
			SuggestionKind::TechContext,
			format!("{tech} guides and examples"),
			format!("{} examples", tech.to_lowercase()),
		));
	}

	if trimmed.chars().count() >= MIN_OPERATOR_HINT_CHARS
		&& let Some(hint) = operator_hint(trimmed, &tokens)
	{
		suggestions.push(hint);
	}

	suggestions.truncate(MAX_SUGGESTIONS);
	suggestions
}

fn first_match(tokens: &[&str], catalog: Catalog) -> Option<&'static str> {
	tokens.iter().find_map(|token| {
		catalog
			.iter()
			.find(|(aliases, _)| aliases.contains(token))
			.map(|(_, name)| *name)
	})
}

fn intersects(tokens: &[&str], vocabulary: &[&str]) -> bool {
	tokens.iter().any(|token| vocabulary.contains(token))
}

fn has_operator(tokens: &[&str]) -> bool {
	tokens
		.iter()
		.any(|token| OPERATORS.iter().any(|op| token.starts_with(op)))
}

/// `tokens` are the lower-cased words of `text`; names and messages are taken
/// from `text` so the user's casing survives.
fn operator_hint(text: &str, tokens: &[&str]) -> Option<Suggestion> {
	if has_operator(tokens) {
		return None;
	}

	let trailing = tokens
		.last()
		.copied()
		.filter(|token| !FUNCTION_CUES.contains(token) && !CLASS_CUES.contains(token))
		.and_then(|_| text.split_whitespace().last());

	if intersects(tokens, FUNCTION_CUES) {
		return trailing.map(|name| {
			Suggestion::new(
				SuggestionKind::OperatorHint,
				format!("Search functions named {name}"),
				format!("function:{name}"),
			)
		});
	}

	if intersects(tokens, CLASS_CUES) {
		return trailing.map(|name| {
			Suggestion::new(
				SuggestionKind::OperatorHint,
				format!("Search types named {name}"),
				format!("class:{name}"),
			)
		});
	}

	let message = error_message(text)?;
	Some(Suggestion::new(
		SuggestionKind::OperatorHint,
		format!("Search error messages matching \"{message}\""),
		format!("error:\"{message}\""),
	))
}

/// The text following the first word that ends in "error" (`error`,
/// `TypeError`, `ImportError:`), matched without regard to case.
fn error_message(text: &str) -> Option<&str> {
	let mut rest = text;
	loop {
		let word_start = rest.trim_start();
		if word_start.is_empty() {
			return None;
		}
		let end = word_start
			.find(char::is_whitespace)
			.unwrap_or(word_start.len());
		let (word, after) = word_start.split_at(end);
		if word
			.trim_end_matches(':')
			.to_ascii_lowercase()
			.ends_with("error")
		{
			let message = after.trim();
			return (!message.is_empty()).then_some(message);
		}
		rest = after;
	}
}
