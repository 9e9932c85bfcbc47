//! SQLite backend for the Antioch supporter store.

mod encode;
mod error;
mod schema;
mod store;


pub use error::{Error, Result};
pub use store::SqliteStore;
