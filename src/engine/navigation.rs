//! Keyboard and pointer navigation over the composite list.
//!
//! Mouse hover and arrow keys share one active index. `None` is the
//! "nothing selected" state: Enter then submits the raw input text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
	Focus,
	Typing,
	ArrowDown,
	ArrowUp,
	Enter,
	Escape,
	PointerOutside,
	Hover(usize),
}

/// What `Enter` asked to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteTarget {
	/// The composite entry at this flat index.
	Entry(usize),
	/// The current input text.
	RawText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
	#[default]
	Closed,
	Open {
		active: Option<usize>,
	},
}

impl NavigationState {
	#[must_use]
	pub fn is_open(self) -> bool {
		matches!(self, NavigationState::Open { .. })
	}

	#[must_use]
	pub fn active(self) -> Option<usize> {
		match self {
			NavigationState::Open { active } => active,
			NavigationState::Closed => None,
		}
	}

	pub fn close(&mut self) {
		*self = NavigationState::Closed;
	}

	/// Open with no selection.
	pub fn reset(&mut self) {
		*self = NavigationState::Open { active: None };
	}

	/// Drop a selection that no longer points into a list of `total` entries.
	pub fn fit(&mut self, total: usize) {
		if let NavigationState::Open { active: Some(index) } = *self
			&& index >= total
		{
			*self = NavigationState::Open { active: None };
		}
	}

	/// Apply `event` against a list of `total` entries.
	///
	/// Returns the execute target when the event is `Enter`; the caller owns
	/// the execute side effects, including closing the list.
	pub fn apply(&mut self, event: NavEvent, total: usize) -> Option<ExecuteTarget> {
		match event {
			NavEvent::Focus | NavEvent::Typing => self.reset(),
			NavEvent::ArrowDown => {
				let next = match (self.active(), total) {
					(_, 0) => None,
					(None, _) => Some(0),
					(Some(index), _) => Some((index + 1) % total),
				};
				*self = NavigationState::Open { active: next };
			}
			NavEvent::ArrowUp => {
				let next = match (self.active(), total) {
					(_, 0) => None,
					(None | Some(0), _) => Some(total - 1),
					(Some(index), _) => Some(index.min(total) - 1),
				};
				*self = NavigationState::Open { active: next };
			}
			NavEvent::Enter => {
				return Some(match self.active() {
					Some(index) if index < total => ExecuteTarget::Entry(index),
					_ => ExecuteTarget::RawText,
				});
			}
			NavEvent::Escape | NavEvent::PointerOutside => self.close(),
			NavEvent::Hover(index) => {
				if index < total {
					*self = NavigationState::Open {
						active: Some(index),
					};
				}
			}
		}
		None
	}
}
