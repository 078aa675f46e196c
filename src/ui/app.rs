use std::time::Duration;

use log::{debug, trace};
use ratatui::layout::{Position, Rect};
use throbber_widgets_tui::ThrobberState;

use super::input::SearchInput;
use super::theme::Theme;
use crate::engine::debounce::Debouncer;
use crate::engine::filters::Facet;
use crate::engine::intent::ExecuteIntent;
use crate::engine::navigation::NavEvent;
use crate::engine::session::SearchSession;
use crate::logging::LoggerWidgetState;
use crate::remote::{SearchApi, SearchResponse, SearchRuntime};
use crate::storage::SlotStore;

/// What the user did before the surface closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
	pub accepted: bool,
	pub query: String,
	pub intent: Option<ExecuteIntent>,
}

/// Which part of the surface receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
	Input,
	Palette,
	/// Nothing editable has focus; `/` returns to the input.
	Idle,
}

/// Screen geometry from the last frame, used to resolve mouse events.
#[derive(Debug, Clone, Default)]
pub(crate) struct HitMap {
	pub(crate) surface: Rect,
	pub(crate) rows: Vec<(Rect, usize)>,
}

impl HitMap {
	pub(crate) fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
		let position = Position::new(column, row);
		self.rows
			.iter()
			.find(|(area, _)| area.contains(position))
			.map(|(_, index)| *index)
	}

	pub(crate) fn in_surface(&self, column: u16, row: u16) -> bool {
		self.surface.contains(Position::new(column, row))
	}
}

pub struct App<C, S> {
	pub(crate) session: SearchSession<S>,
	pub(crate) search_input: SearchInput<'static>,
	pub(crate) debouncer: Debouncer<String>,
	pub(crate) search: SearchRuntime<C>,
	pub(crate) focus: Focus,
	pub(crate) palette_cursor: usize,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) show_logs: bool,
	pub(crate) logger: LoggerWidgetState,
	pub(crate) theme: Theme,
	pub(crate) input_title: Option<String>,
	pub(crate) hit_map: HitMap,
}

impl<C: SearchApi, S: SlotStore> App<C, S> {
	pub fn new(session: SearchSession<S>, client: C, debounce: Duration) -> Self {
		let mut search_input = SearchInput::new("");
		search_input.set_focused(true);
		let mut app = Self {
			session,
			search_input,
			debouncer: Debouncer::new(debounce),
			search: SearchRuntime::new(client),
			focus: Focus::Input,
			palette_cursor: 0,
			throbber_state: ThrobberState::default(),
			show_logs: false,
			logger: LoggerWidgetState::new(),
			theme: Theme::default(),
			input_title: None,
			hit_map: HitMap::default(),
		};
		app.session.handle(NavEvent::Focus);
		app
	}

	/// Start with `query` in the input. Must be called within a tokio runtime
	/// when `query` is not empty.
	#[must_use]
	pub fn with_initial_query(mut self, query: &str) -> Self {
		if !query.is_empty() {
			self.search_input.set_text(query);
			self.text_changed();
		}
		self
	}

	#[must_use]
	pub fn with_input_title(mut self, title: impl Into<String>) -> Self {
		self.input_title = Some(title.into());
		self
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	#[must_use]
	pub fn session(&self) -> &SearchSession<S> {
		&self.session
	}

	#[must_use]
	pub fn focus(&self) -> Focus {
		self.focus
	}

	pub(crate) fn text_changed(&mut self) {
		let text = self.search_input.text().to_string();
		trace!("input changed to {text:?}");
		self.session.set_text(text.clone());
		self.debouncer.push(text);
	}

	/// Re-run the current text so the next query carries the new filters.
	pub(crate) fn filters_changed(&mut self) {
		debug!("filters now {:?}", self.session.filters().summary());
		self.debouncer.push(self.search_input.text().to_string());
	}

	pub(crate) fn on_settled(&mut self, text: String) {
		if let Some(query) = self.session.settle(&text) {
			debug!("dispatching query #{} {:?}", query.sequence(), query.text());
			self.search.issue_search(query);
		}
	}

	pub(crate) fn on_response(&mut self, response: SearchResponse) {
		self.session
			.apply_response(response.sequence, response.outcome);
	}

	pub(crate) fn focus_input(&mut self) {
		self.focus = Focus::Input;
		self.search_input.set_focused(true);
		self.session.handle(NavEvent::Focus);
	}

	pub(crate) fn blur(&mut self) {
		self.focus = Focus::Idle;
		self.search_input.set_focused(false);
	}

	pub(crate) fn toggle_palette(&mut self) {
		if self.focus == Focus::Palette {
			self.focus_input();
		} else {
			self.focus = Focus::Palette;
			self.search_input.set_focused(false);
		}
	}

	pub(crate) fn palette_facet(&self) -> Facet {
		Facet::ALL[self.palette_cursor % Facet::ALL.len()]
	}

	pub(crate) fn finish(&mut self, intent: ExecuteIntent) -> SearchOutcome {
		self.debouncer.cancel();
		SearchOutcome {
			accepted: true,
			query: intent.query.clone(),
			intent: Some(intent),
		}
	}

	pub(crate) fn cancelled(&mut self) -> SearchOutcome {
		self.debouncer.cancel();
		SearchOutcome {
			accepted: false,
			query: self.search_input.text().to_string(),
			intent: None,
		}
	}
}
