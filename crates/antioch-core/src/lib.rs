//! Core types and trait definitions for the Antioch missions back office.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod directory;
pub mod error;
pub mod individual;
pub mod phone;
pub mod pledge;
pub mod resolve;
pub mod store;

pub use error::{Error, Result};
pub use resolve::{Resolution, ResolveError, resolve_or_create};
