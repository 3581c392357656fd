use crate::{db::DatabaseProvider, AppState};
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Configured storage backend, e.g. `in-memory` or `sqlite:<path>`
    pub database: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseProvider::from_config(&state.config.database).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::AuthService;
    use crate::db::traits::MockUserStore;
    use crate::utils::toml_config::AppConfig;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_reports_configured_database() {
        let mut config = AppConfig::default();
        config.database.url = "./data/health.db".to_string();
        let state = AppState {
            config: Arc::new(config),
            store: Arc::new(MockUserStore::new()),
            auth_service: Arc::new(AuthService::new(
                "health-test-secret-of-32-characters".to_string(),
                900,
            )),
        };

        let Json(body) = health_check(State(state)).await;

        assert_eq!(body.status, "ok");
        assert_eq!(body.database, "sqlite:./data/health.db");
    }
}
