//! Typed resource clients for the Linode API v4.
//!
//! Provides the resource table, typed entity models, the pagination engine that gathers every
//! page of a collection, and the completion poller that waits for an asynchronous operation's
//! event to finish.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod events;
pub mod models;
pub mod pagination;
pub mod resource;
pub mod waiter;

#[cfg(test)]
mod test_support;

pub use client::{LinodeClient, LinodeClientBuilder};
pub use linode_core::list::{Filter, ListOptions, Page, SortOrder};
pub use resource::{Resource, Scope};
pub use waiter::{cancellation, CancelHandle, CancelToken, EventWait, EVENT_POLL_INTERVAL};

/// Convenient result alias that reuses the shared Linode error type.
pub type Result<T> = linode_core::Result<T>;
