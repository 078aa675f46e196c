//! Route `log` records into the terminal log pane.
//!
//! While the UI owns the terminal nothing may be written to stderr, so every
//! record is captured by `tui-logger` and shown in the pane toggled with F2.
//! `init_logger` starts the background thread that moves captured records into
//! the widget buffer, so the event loop only has to redraw.

use std::sync::Once;

use log::LevelFilter;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

static INIT: Once = Once::new();

/// Install the capturing logger once and set the level shown by default.
pub fn initialize(level: LevelFilter) {
	INIT.call_once(|| {
		if tui_logger::init_logger(LevelFilter::Trace).is_err() {
			// Another logger is already installed; records go there instead.
			return;
		}
		tui_logger::set_default_level(LevelFilter::Trace);
	});
	log::set_max_level(level);
}

pub struct LoggerWidgetState {
	widget: TuiWidgetState,
}

impl LoggerWidgetState {
	pub fn new() -> Self {
		let widget = TuiWidgetState::new().set_default_display_level(LevelFilter::Debug);
		Self { widget }
	}

	pub fn widget(&self) -> &TuiWidgetState {
		&self.widget
	}

	/// Forward pane navigation keys. Returns whether the key was consumed.
	pub fn handle_key(&self, key: KeyEvent) -> bool {
		if key.kind != KeyEventKind::Press {
			return false;
		}

		let event = match key.code {
			KeyCode::Char(' ') => Some(TuiWidgetEvent::SpaceKey),
			KeyCode::Char('+') => Some(TuiWidgetEvent::PlusKey),
			KeyCode::Char('-') => Some(TuiWidgetEvent::MinusKey),
			KeyCode::Left => Some(TuiWidgetEvent::LeftKey),
			KeyCode::Right => Some(TuiWidgetEvent::RightKey),
			KeyCode::PageUp => Some(TuiWidgetEvent::PrevPageKey),
			KeyCode::PageDown => Some(TuiWidgetEvent::NextPageKey),
			_ => None,
		};

		if let Some(event) = event {
			self.widget.transition(event);
			return true;
		}

		false
	}
}

impl Default for LoggerWidgetState {
	fn default() -> Self {
		Self::new()
	}
}
