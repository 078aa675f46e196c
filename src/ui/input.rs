//! Single-line query input backed by `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, Input, Key, TextArea};

const PLACEHOLDER: &str = "Search articles, snippets and docs";

pub struct SearchInput<'a> {
	textarea: TextArea<'a>,
}

impl<'a> SearchInput<'a> {
	pub fn new(initial: impl Into<String>) -> Self {
		let mut textarea = TextArea::new(vec![initial.into()]);
		textarea.set_cursor_line_style(Style::default());
		textarea.set_placeholder_text(PLACEHOLDER);
		textarea.move_cursor(CursorMove::End);
		Self { textarea }
	}

	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Feed a key to the editor. Returns whether the text changed.
	///
	/// Keys that would insert a line break are swallowed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		let input = Input::from(key);
		if matches!(
			input,
			Input { key: Key::Enter, .. }
				| Input {
					key: Key::Char('m' | 'j'),
					ctrl: true,
					..
				}
		) {
			return false;
		}
		let before = self.text().to_string();
		self.textarea.input(input);
		self.text() != before
	}

	pub fn set_text(&mut self, text: &str) {
		let mut replacement = Self::new(text);
		replacement
			.textarea
			.set_cursor_style(self.textarea.cursor_style());
		*self = replacement;
	}

	/// Show or hide the block cursor.
	pub fn set_focused(&mut self, focused: bool) {
		let style = if focused {
			Style::default().add_modifier(Modifier::REVERSED)
		} else {
			Style::default()
		};
		self.textarea.set_cursor_style(style);
	}

	pub fn render_textarea(&self, frame: &mut Frame, area: Rect) {
		frame.render_widget(&self.textarea, area);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ratatui::crossterm::event::{KeyCode, KeyModifiers};

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	#[test]
	fn typing_reports_changes() {
		let mut input = SearchInput::new("");
		assert!(input.input(key(KeyCode::Char('g'))));
		assert!(input.input(key(KeyCode::Char('o'))));
		assert_eq!(input.text(), "go");
		assert!(!input.input(key(KeyCode::Left)));
	}

	#[test]
	fn enter_never_breaks_the_line() {
		let mut input = SearchInput::new("rust");
		assert!(!input.input(key(KeyCode::Enter)));
		assert!(!input.input(KeyEvent::new(KeyCode::Char('m'), KeyModifiers::CONTROL)));
		assert_eq!(input.text(), "rust");
	}

	#[test]
	fn initial_text_places_cursor_at_end() {
		let mut input = SearchInput::new("tok");
		input.input(key(KeyCode::Char('i')));
		assert_eq!(input.text(), "toki");
	}
}
