use ratatui::crossterm::event::{
	Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::app::{App, Focus, SearchOutcome};
use crate::engine::filters::Facet;
use crate::engine::navigation::NavEvent;
use crate::remote::SearchApi;
use crate::storage::SlotStore;

impl<C: SearchApi, S: SlotStore> App<C, S> {
	pub(crate) fn handle_event(&mut self, event: Event) -> Option<SearchOutcome> {
		match event {
			Event::Key(key) => self.handle_key(key),
			Event::Mouse(mouse) => self.handle_mouse(mouse),
			_ => None,
		}
	}

	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<SearchOutcome> {
		if key.kind != KeyEventKind::Press {
			return None;
		}

		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Char('c') if ctrl => return Some(self.cancelled()),
			KeyCode::Char('k') if ctrl => {
				self.toggle_palette();
				return None;
			}
			KeyCode::Char('d') if ctrl => {
				self.session.dismiss_error();
				return None;
			}
			KeyCode::F(2) => {
				self.show_logs = !self.show_logs;
				return None;
			}
			_ => {}
		}

		match self.focus {
			Focus::Input => self.handle_input_key(key),
			Focus::Palette => {
				self.handle_palette_key(key);
				None
			}
			Focus::Idle => self.handle_idle_key(key),
		}
	}

	fn handle_input_key(&mut self, key: KeyEvent) -> Option<SearchOutcome> {
		let event = match key.code {
			KeyCode::Down => NavEvent::ArrowDown,
			KeyCode::Up => NavEvent::ArrowUp,
			KeyCode::Enter => NavEvent::Enter,
			KeyCode::Esc => {
				self.session.handle(NavEvent::Escape);
				self.blur();
				return None;
			}
			_ => {
				if self.search_input.input(key) {
					self.text_changed();
				}
				return None;
			}
		};
		let intent = self.session.handle(event)?;
		Some(self.finish(intent))
	}

	fn handle_palette_key(&mut self, key: KeyEvent) {
		let facets = Facet::ALL.len();
		let facet = self.palette_facet();
		match key.code {
			KeyCode::Down | KeyCode::Tab => self.palette_cursor = (self.palette_cursor + 1) % facets,
			KeyCode::Up | KeyCode::BackTab => {
				self.palette_cursor = (self.palette_cursor + facets - 1) % facets;
			}
			KeyCode::Right | KeyCode::Char(' ') => {
				self.session.cycle_filter(facet, true);
				self.filters_changed();
			}
			KeyCode::Left => {
				self.session.cycle_filter(facet, false);
				self.filters_changed();
			}
			KeyCode::Backspace | KeyCode::Delete => {
				self.session.set_filter(facet, None);
				self.filters_changed();
			}
			KeyCode::Char('x') => {
				self.session.clear_filters();
				self.filters_changed();
			}
			KeyCode::Esc | KeyCode::Enter => self.focus_input(),
			_ => {}
		}
	}

	fn handle_idle_key(&mut self, key: KeyEvent) -> Option<SearchOutcome> {
		match key.code {
			KeyCode::Char('/') => self.focus_input(),
			KeyCode::Esc => return Some(self.cancelled()),
			_ if self.show_logs => {
				self.logger.handle_key(key);
			}
			_ => {}
		}
		None
	}

	pub(crate) fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<SearchOutcome> {
		let (column, row) = (mouse.column, mouse.row);
		match mouse.kind {
			MouseEventKind::Moved => {
				if let Some(index) = self.hit_map.entry_at(column, row) {
					self.session.handle(NavEvent::Hover(index));
				}
				None
			}
			MouseEventKind::Down(MouseButton::Left) => {
				if let Some(index) = self.hit_map.entry_at(column, row) {
					self.session.handle(NavEvent::Hover(index));
					let intent = self.session.handle(NavEvent::Enter)?;
					return Some(self.finish(intent));
				}
				if self.hit_map.in_surface(column, row) {
					if self.focus != Focus::Input {
						self.focus_input();
					}
				} else {
					self.session.handle(NavEvent::PointerOutside);
					self.blur();
				}
				None
			}
			_ => None,
		}
	}
}
