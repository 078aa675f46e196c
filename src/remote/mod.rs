//! Remote search: HTTP transport, request runtime and the sequence gate that
//! keeps stale responses off screen.

mod client;
mod runtime;
mod tracker;

pub use client::{HttpSearchClient, SearchApi};
pub use runtime::{SearchResponse, SearchRuntime};
pub use tracker::{Applied, RemoteState, ResultTracker};

#[cfg(test)]
pub(crate) use runtime::tests::ScriptedApi;
