//! User persistence.
//!
//! This module provides the storage layer behind the API:
//! - **`UserStore`**: async trait for create/find/update/delete of user records
//! - **`TursoClient`**: libsql implementation (in-memory, SQLite file, or remote Turso)
//!
//! Enable the remote backend via Cargo features:
//! ```toml
//! usergate-server = { version = "*", features = ["turso"] }
//! ```

#![allow(missing_docs)]

pub mod traits;
pub mod turso;

// Re-exports
pub use traits::{DatabaseProvider, UserField, UserStore};
pub use turso::TursoClient;
