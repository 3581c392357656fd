//! Database abstraction traits
//!
//! This module provides the `UserStore` trait that abstracts over different
//! database backends (in-memory SQLite, file-based SQLite, remote Turso).
//!
//! # Example
//!
//! ```rust,ignore
//! use usergate::db::{DatabaseProvider, UserStore};
//!
//! // Use in-memory database (default for development/testing)
//! let db = DatabaseProvider::Memory.create_client().await?;
//!
//! // Use file-based SQLite
//! let db = DatabaseProvider::SQLite { path: "data.db".into() }.create_client().await?;
//!
//! // Use remote Turso (requires `turso` feature)
//! let db = DatabaseProvider::Turso { url, auth_token }.create_client().await?;
//! ```

use crate::types::{NewUser, Result, User, UserUpdate};
use crate::utils::toml_config::DatabaseConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Create a database client from this provider configuration
    pub async fn create_client(&self) -> Result<Arc<dyn UserStore>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::turso::TursoClient::new_memory().await?;
                Ok(Arc::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::turso::TursoClient::new_local(path).await?;
                Ok(Arc::new(client))
            }
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                let client =
                    super::turso::TursoClient::new_remote(url.clone(), auth_token.clone()).await?;
                Ok(Arc::new(client))
            }
        }
    }

    /// Pick a provider from the `[database]` section.
    ///
    /// Remote Turso wins when both of its env vars are set and the `turso`
    /// feature is enabled; `:memory:` or an empty url selects the in-memory
    /// database; anything else is a SQLite file path.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        #[cfg(feature = "turso")]
        {
            if let (Some(url_env), Some(token_env)) =
                (&config.turso_url_env, &config.turso_token_env)
            {
                if let (Ok(url), Ok(token)) = (std::env::var(url_env), std::env::var(token_env)) {
                    if !url.is_empty() && !token.is_empty() {
                        return DatabaseProvider::Turso {
                            url,
                            auth_token: token,
                        };
                    }
                }
            }
        }

        if config.url.is_empty() || config.url == ":memory:" {
            DatabaseProvider::Memory
        } else {
            DatabaseProvider::SQLite {
                path: config.url.clone(),
            }
        }
    }
}

impl std::fmt::Display for DatabaseProvider {
    /// Human-readable target. The Turso auth token is never printed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseProvider::Memory => write!(f, "in-memory"),
            DatabaseProvider::SQLite { path } => write!(f, "sqlite:{}", path),
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, .. } => write!(f, "turso:{}", url),
        }
    }
}

/// Columns a user can be looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Email,
    Name,
}

impl UserField {
    pub fn column(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Email => "email",
            UserField::Name => "name",
        }
    }
}

/// Persistence of user records.
///
/// Implementations assign ids and must keep `email` unique. Updates are
/// applied per record without any cross-request locking; concurrent updates
/// to the same user resolve as last write wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with `AppError::Conflict` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// All users in insertion order.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// First user whose `field` equals `value`.
    async fn find_user_by(&self, field: UserField, value: &str) -> Result<Option<User>>;

    /// Apply a partial update. `None` when no such user exists.
    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>>;

    /// Delete by id, returning the number of records removed.
    async fn delete_user(&self, id: &str) -> Result<u64>;
}
