//! Query suggestion and navigation engine.
//!
//! Leaves first: [`debounce`], [`suggest`], [`filters`], [`query`],
//! [`history`], [`trending`], [`results`]; then the [`composite`] list, the
//! [`navigation`] state machine and the [`session`] that wires them together.

pub mod composite;
pub mod debounce;
pub mod filters;
pub mod history;
pub mod intent;
pub mod navigation;
pub mod query;
pub mod results;
pub mod session;
pub mod suggest;
pub mod trending;
