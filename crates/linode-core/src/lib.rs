//! # linode-core
//!
//! Core types and utilities for working with the Linode API v4.
//!
//! This crate provides the foundational pieces shared by the resource clients: the error
//! type, configuration, the HTTP transport seam, timestamp normalization and the list/page
//! primitives used by the pagination engine.
//!
//! ## Modules
//!
//! - [`error`] - Error types and provider error body decoding
//! - [`ids`] - Strongly-typed numeric identifiers for Linode resources
//! - [`types`] - Event domain types and the canonical [`types::EntityId`]
//! - [`dates`] - Provider timestamp layout parsing and formatting
//! - [`list`] - List options, filter expressions and decoded pages
//! - [`query`] - Query parameter builder
//! - [`config`] - Client configuration (token, host, version, user agent)
//! - [`client`] - HTTP client settings and the [`client::Transport`] abstraction

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod ids;
pub mod list;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
