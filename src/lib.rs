//! # usergate
//!
//! A user-management HTTP API built on Axum: user CRUD, password
//! registration and login, JWT identity tokens and role-gated routes.
//!
//! ## Overview
//!
//! usergate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `usergate-server` binary
//! 2. **As a library** - Reuse the hasher, token service and gates in your own Axum app
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use usergate::{api::routes::build_app, auth::jwt::AuthService, db::DatabaseProvider, AppState};
//!
//! let store = DatabaseProvider::Memory.create_client().await?;
//! let state = AppState {
//!     config: Arc::new(config),
//!     store,
//!     auth_service: Arc::new(AuthService::new(secret, 3600)),
//! };
//! let app = build_app(state);
//! ```
//!
//! ## Request Pipeline
//!
//! ```text
//! client -> authentication gate -> role gate -> handler -> UserStore
//! ```
//!
//! Registration hashes the password before it reaches the store. Login looks
//! the user up by email, verifies the password and issues a token carrying
//! the user's id and a snapshot of their role.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `turso` | Remote Turso database |
//! | `swagger-ui` | Interactive API docs at `/swagger-ui` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Password hashing, JWT tokens and access gates
//! - [`db`] - User store abstraction and libsql implementation
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and logging setup

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Password hashing, JWT tokens and access gates.
pub mod auth;
/// CLI parsing and commands for the server binary.
pub mod cli;
/// User persistence.
pub mod db;
/// Core types (records, requests, responses, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::jwt::AuthService;
pub use db::{DatabaseProvider, UserStore};
pub use types::{AppError, Result};
pub use utils::toml_config::AppConfig;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<AppConfig>,
    /// User store
    pub store: Arc<dyn UserStore>,
    /// Token service
    pub auth_service: Arc<AuthService>,
}
