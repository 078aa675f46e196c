use ratatui::{
	Frame,
	layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
	style::Style,
	text::{Line, Span},
	widgets::{Block, Borders, Clear, Paragraph},
};
use throbber_widgets_tui::Throbber;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerSmartWidget};
use unicode_width::UnicodeWidthStr;

use super::app::{App, Focus};
use crate::engine::filters::Facet;
use crate::engine::navigation::NavigationState;
use crate::remote::SearchApi;
use crate::storage::SlotStore;

const DEFAULT_PROMPT: &str = "Search";
const SEARCHING_LABEL: &str = " searching";

/// One visual line of the suggestion list.
enum ListLine<'a> {
	Header(&'a str),
	Entry {
		index: usize,
		icon: &'static str,
		label: &'a str,
		detail: Option<&'a str>,
	},
}

impl<C: SearchApi, S: SlotStore> App<C, S> {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});

		let (surface_area, log_area) = if self.show_logs {
			let split = Layout::default()
				.direction(Direction::Vertical)
				.constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
				.split(area);
			(split[0], Some(split[1]))
		} else {
			(area, None)
		};

		let error_height = u16::from(self.session.remote().error().is_some());
		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(1),
				Constraint::Length(1),
				Constraint::Length(error_height),
				Constraint::Min(0),
			])
			.split(surface_area);

		self.render_input(frame, layout[0]);
		self.render_filters(frame, layout[1]);
		self.render_error(frame, layout[2]);
		let list_height = self.render_list(frame, layout[3]);

		self.hit_map.surface = Rect {
			height: layout[3].y - surface_area.y + list_height,
			..surface_area
		};

		if let Some(log_area) = log_area {
			self.render_logs(frame, log_area);
		}
	}

	fn render_input(&self, frame: &mut Frame, area: Rect) {
		let prompt = format!(
			"{} > ",
			self.input_title.as_deref().unwrap_or(DEFAULT_PROMPT)
		);
		let pending = self.session.remote().is_pending();
		let status_width = if pending {
			SEARCHING_LABEL.width() as u16 + 1
		} else {
			0
		};
		let columns = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([
				Constraint::Length(prompt.width() as u16),
				Constraint::Min(1),
				Constraint::Length(status_width),
			])
			.split(area);

		frame.render_widget(
			Paragraph::new(prompt).style(self.theme.prompt_style()),
			columns[0],
		);
		self.search_input.render_textarea(frame, columns[1]);

		if pending {
			let muted = self.theme.empty_style();
			let spinner = Throbber::default().style(muted).throbber_style(muted);
			let line = Line::from(vec![
				spinner.to_symbol_span(&self.throbber_state),
				Span::styled(SEARCHING_LABEL, muted),
			]);
			frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), columns[2]);
		}
	}

	fn render_filters(&self, frame: &mut Frame, area: Rect) {
		let filters = self.session.filters();
		let line = if self.focus == Focus::Palette {
			let selected = self.palette_facet();
			let mut spans = Vec::new();
			for facet in Facet::ALL {
				let value = filters.get(facet).unwrap_or("any");
				let style = if facet == selected {
					self.theme.row_highlight_style()
				} else {
					Style::default()
				};
				spans.push(Span::styled(format!(" {}: {value} ", facet.label()), style));
			}
			Line::from(spans)
		} else if filters.is_empty() {
			Line::from(Span::styled(
				"No filters (Ctrl+K to edit)",
				self.theme.empty_style(),
			))
		} else {
			Line::from(vec![
				Span::styled("Filters: ", self.theme.empty_style()),
				Span::raw(filters.summary()),
			])
		};
		frame.render_widget(Paragraph::new(line), area);
	}

	fn render_error(&self, frame: &mut Frame, area: Rect) {
		let Some(reason) = self.session.remote().error() else {
			return;
		};
		let line = Line::from(vec![
			Span::styled(format!("! {reason}"), self.theme.error_style()),
			Span::styled("  (Ctrl+D to dismiss)", self.theme.empty_style()),
		]);
		frame.render_widget(Paragraph::new(line), area);
	}

	/// Draw the sectioned list and record row targets. Returns the height used.
	fn render_list(&mut self, frame: &mut Frame, area: Rect) -> u16 {
		self.hit_map.rows.clear();
		let NavigationState::Open { active } = self.session.navigation() else {
			if self.focus == Focus::Idle && area.height > 0 {
				let hint = Paragraph::new("Press / to search, Esc to quit")
					.style(self.theme.empty_style());
				frame.render_widget(hint, area);
			}
			return 0;
		};

		let composite = self.session.composite();
		if composite.is_empty() {
			if !self.session.text().trim().is_empty() && area.height > 0 {
				let empty = Paragraph::new("No suggestions").style(self.theme.empty_style());
				frame.render_widget(empty, area);
				return 1;
			}
			return 0;
		}

		let mut lines = Vec::new();
		for section in composite.sections() {
			lines.push(ListLine::Header(section.kind.title()));
			for entry in composite.section_entries(section) {
				lines.push(ListLine::Entry {
					index: entry.index,
					icon: entry.icon().glyph(),
					label: entry.label(),
					detail: entry.detail(),
				});
			}
		}

		let height = usize::from(area.height);
		let active_line = active.and_then(|active| {
			lines
				.iter()
				.position(|line| matches!(line, ListLine::Entry { index, .. } if *index == active))
		});
		let offset = match active_line {
			Some(line) if height > 0 && line >= height => line + 1 - height,
			_ => 0,
		};

		let mut rendered = Vec::new();
		for (row, line) in lines.iter().skip(offset).take(height).enumerate() {
			let y = area.y + row as u16;
			let text = match *line {
				ListLine::Header(title) => {
					Line::from(Span::styled(title.to_string(), self.theme.header_style()))
				}
				ListLine::Entry {
					index,
					icon,
					label,
					detail,
				} => {
					self.hit_map.rows.push((Rect::new(area.x, y, area.width, 1), index));
					let mut spans = vec![Span::raw(format!("  {icon} ")), Span::raw(label.to_string())];
					if let Some(detail) = detail {
						spans.push(Span::styled(format!("  {detail}"), self.theme.empty_style()));
					}
					let line = Line::from(spans);
					if Some(index) == active {
						line.style(self.theme.row_highlight_style())
					} else {
						line
					}
				}
			};
			rendered.push(text);
		}

		let used = rendered.len() as u16;
		frame.render_widget(Paragraph::new(rendered), area);
		used
	}

	fn render_logs(&self, frame: &mut Frame, area: Rect) {
		frame.render_widget(Clear, area);
		if area.width == 0 || area.height == 0 {
			return;
		}
		let widget = TuiLoggerSmartWidget::default()
			.title_log("Runtime log")
			.title_target("Targets")
			.highlight_style(self.theme.highlight_style())
			.output_level(Some(TuiLoggerLevelOutput::Abbreviated))
			.state(self.logger.widget());
		let block = Block::default().borders(Borders::TOP);
		let inner = block.inner(area);
		frame.render_widget(block, area);
		frame.render_widget(widget, inner);
	}
}

#[cfg(test)]
mod tests {
	use ratatui::{Terminal, backend::TestBackend};

	use super::*;
	use crate::engine::results::{ResultItem, ResultKind};
	use crate::error::SearchError;
	use crate::remote::ScriptedApi;
	use crate::ui::app::tests::{test_app, type_text};

	fn render<C: SearchApi, S: SlotStore>(app: &mut App<C, S>) -> String {
		let mut terminal = Terminal::new(TestBackend::new(70, 14)).unwrap();
		terminal.draw(|frame| app.draw(frame)).unwrap();
		terminal.backend().to_string()
	}

	#[tokio::test]
	async fn empty_input_shows_trending() {
		let mut app = test_app(ScriptedApi::default());
		let view = render(&mut app);
		assert!(view.contains("Search > "));
		assert!(view.contains("Trending"));
		assert!(view.contains("rust async patterns"));
		assert!(view.contains("No filters"));
		assert_eq!(app.hit_map.rows.len(), 5);
	}

	#[tokio::test]
	async fn results_and_suggestions_render_in_sections() {
		let mut app = test_app(ScriptedApi::default());
		type_text(&mut app, "python error fix");
		let query = app.session.settle("python error fix").unwrap();
		app.session.apply_response(
			query.sequence(),
			Ok(vec![
				ResultItem::new("1", ResultKind::Article, "Fixing ImportError")
					.with_excerpt("module resolution"),
			]),
		);

		let view = render(&mut app);
		assert!(view.contains("Suggestions"));
		assert!(view.contains("Python common errors"));
		assert!(view.contains("Results"));
		assert!(view.contains("Fixing ImportError"));
		assert!(view.contains("module resolution"));
		assert!(!view.contains("Trending"));
	}

	#[tokio::test]
	async fn errors_render_inline_with_the_dismiss_hint() {
		let mut app = test_app(ScriptedApi::default());
		type_text(&mut app, "golang");
		let query = app.session.settle("golang").unwrap();
		app.session
			.apply_response(query.sequence(), Err(SearchError::Status { status: 503 }));

		let view = render(&mut app);
		assert!(view.contains("Ctrl+D to dismiss"));
		assert!(view.contains("golang"));
	}

	#[tokio::test]
	async fn rows_map_back_to_flat_indices() {
		let mut app = test_app(ScriptedApi::default());
		render(&mut app);
		let (first_area, first_index) = app.hit_map.rows[0];
		assert_eq!(first_index, 0);
		assert_eq!(app.hit_map.entry_at(first_area.x + 3, first_area.y), Some(0));
		assert!(app.hit_map.in_surface(first_area.x, first_area.y));
	}
}
