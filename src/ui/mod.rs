//! Terminal host for a [`SearchSession`](crate::engine::session::SearchSession).
//!
//! [`App`] owns the session together with the text input, the debouncer and
//! the request runtime. [`run`] drives it on a single-threaded tokio loop that
//! selects over terminal input, debounce expiry, search responses and a
//! render tick.

mod actions;
mod app;
mod input;
mod render;
mod runtime;
mod theme;

pub use app::{App, Focus, SearchOutcome};
pub use input::SearchInput;
pub use runtime::run;
pub use theme::{SLATE, Theme};
