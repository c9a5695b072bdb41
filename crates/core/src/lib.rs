//! Samsa Market Core - Shared types library.
//!
//! This crate provides common types used across all Samsa Market components:
//! - `storefront` - Public-facing recipe storefront server
//! - `cli` - Command-line tools for seeding and backend checks
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Document ids, emails, prices, nations, recipes, and the
//!   cart quantity mapping

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
