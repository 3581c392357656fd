use crate::db::traits::{UserField, UserStore};
use crate::types::{AppError, NewUser, Result, Role, User, UserUpdate};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{Builder, Connection, Database, Row, Value};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, age, password_hash, role, created_at, updated_at";

/// libsql-backed user store.
///
/// A single connection is opened up front and shared; for `:memory:`
/// databases every new connection would see an empty database.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// In-memory database, dropped with the client.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {}", e)))?;

        Self::from_database(db).await
    }

    /// SQLite file database. Parent directories are created as needed.
    pub async fn new_local(path: &str) -> Result<Self> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Database(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database {}: {}", path, e)))?;

        Self::from_database(db).await
    }

    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        Self::from_database(db).await
    }

    async fn from_database(db: Database) -> Result<Self> {
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        Ok(client)
    }

    async fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    age INTEGER NOT NULL,
                    password_hash TEXT,
                    role TEXT NOT NULL DEFAULT 'user',
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }

    async fn query_users(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<User>> {
        let mut rows = self
            .conn
            .query(sql, params)
            .await
            .map_err(|e| AppError::Database(format!("Failed to query users: {}", e)))?;

        let mut users = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            users.push(user_from_row(&row)?);
        }

        Ok(users)
    }
}

fn user_from_row(row: &Row) -> Result<User> {
    let password_hash = match row
        .get_value(4)
        .map_err(|e| AppError::Database(e.to_string()))?
    {
        Value::Null => None,
        Value::Text(hash) => Some(hash),
        other => {
            return Err(AppError::Database(format!(
                "Unexpected password_hash value: {:?}",
                other
            )))
        }
    };
    let role: String = row.get(5).map_err(|e| AppError::Database(e.to_string()))?;

    Ok(User {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        email: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        age: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        password_hash,
        role: role
            .parse::<Role>()
            .map_err(|_| AppError::Database(format!("Unknown role stored: {}", role)))?,
        created_at: row.get(6).map_err(|e| AppError::Database(e.to_string()))?,
        updated_at: row.get(7).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

/// Unique-constraint violations become `Conflict`; everything else `Database`.
fn write_error(context: &str, e: libsql::Error) -> AppError {
    let message = e.to_string();
    if message.contains("UNIQUE constraint failed") {
        AppError::Conflict(format!("{}: {}", context, message))
    } else {
        AppError::Database(format!("{}: {}", context, message))
    }
}

fn optional_text(value: Option<String>) -> Value {
    value.map(Value::Text).unwrap_or(Value::Null)
}

#[async_trait]
impl UserStore for TursoClient {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();

        self.conn
            .execute(
                "INSERT INTO users (id, name, email, age, password_hash, role, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                (
                    id.as_str(),
                    user.name.as_str(),
                    user.email.as_str(),
                    user.age,
                    optional_text(user.password_hash.clone()),
                    user.role.as_str(),
                    now,
                    now,
                ),
            )
            .await
            .map_err(|e| write_error("Failed to create user", e))?;

        Ok(User {
            id,
            name: user.name,
            email: user.email,
            age: user.age,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
            updated_at: now,
        })
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.query_users(
            &format!("SELECT {} FROM users ORDER BY rowid", USER_COLUMNS),
            (),
        )
        .await
    }

    async fn find_user_by(&self, field: UserField, value: &str) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {} FROM users WHERE {} = ? ORDER BY rowid LIMIT 1",
            USER_COLUMNS,
            field.column()
        );

        Ok(self.query_users(&sql, [value]).await?.into_iter().next())
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
        let now = Utc::now().timestamp();

        let changed = self
            .conn
            .execute(
                "UPDATE users SET
                    name = COALESCE(?, name),
                    email = COALESCE(?, email),
                    age = COALESCE(?, age),
                    updated_at = ?
                 WHERE id = ?",
                (
                    optional_text(update.name),
                    optional_text(update.email),
                    update.age.map(Value::Integer).unwrap_or(Value::Null),
                    now,
                    id,
                ),
            )
            .await
            .map_err(|e| write_error("Failed to update user", e))?;

        if changed == 0 {
            return Ok(None);
        }

        self.find_user_by(UserField::Id, id).await
    }

    async fn delete_user(&self, id: &str) -> Result<u64> {
        self.conn
            .execute("DELETE FROM users WHERE id = ?", [id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete user: {}", e)))
    }
}
