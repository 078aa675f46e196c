//! Query suggestion and navigation engine for a content search box.
//!
//! The [`engine`] holds the pure pieces (debouncing, heuristic suggestions,
//! history, composition and navigation) and the [`engine::session`] object
//! that wires them together. [`remote`] talks to the search API and keeps
//! stale responses out of the display state. [`ui`] hosts a session in the
//! terminal.

pub mod app_dirs;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod remote;
pub mod storage;
pub mod ui;

pub use config::{ApiConfig, EngineConfig, NavigationConfig};
pub use engine::filters::{Facet, FilterSet};
pub use engine::history::{HISTORY_SLOT, HistoryStore};
pub use engine::intent::ExecuteIntent;
pub use engine::session::SearchSession;
pub use error::{SearchError, StorageError};
pub use remote::{HttpSearchClient, SearchApi};
pub use storage::{FileSlotStore, MemorySlotStore, SlotStore};
pub use ui::{App, SearchOutcome, Theme, run};
