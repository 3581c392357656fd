//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for usergate, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Authentication
//! - `POST /register` - Register a user with password and optional role
//! - `POST /login` - Login and receive a JWT token
//!
//! ## Users
//! - `POST /users` - Create a user (no token needed)
//! - `GET /users` - List users
//! - `GET /users/{id}` - Get a user
//! - `PUT /users/{id}` - Update name, email or age
//! - `DELETE /users/{id}` - Delete a user
//!
//! ## Role-restricted
//! - `GET /admin` - `admin` role only
//! - `GET /owner` - `owner` role only
//!
//! ## Health
//! - `GET /health` - Health check endpoint
//!
//! # Authentication
//!
//! Protected endpoints require a valid JWT token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

/// OpenAPI description of the HTTP surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::auth::register,
        handlers::auth::login,
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::roles::admin_area,
        handlers::roles::owner_area,
    ),
    components(schemas(
        crate::types::Role,
        crate::types::User,
        crate::types::CreateUserRequest,
        crate::types::UpdateUserRequest,
        crate::types::RegisterRequest,
        crate::types::LoginRequest,
        crate::types::TokenResponse,
        crate::types::MessageResponse,
        crate::types::ErrorResponse,
        handlers::health::HealthResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "User records"),
        (name = "roles", description = "Role-restricted areas"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();

        for path in [
            "/health",
            "/register",
            "/login",
            "/users",
            "/users/{id}",
            "/admin",
            "/owner",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "{} missing from OpenAPI document",
                path
            );
        }
    }

    #[test]
    fn test_openapi_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components should be present");

        assert!(components.security_schemes.contains_key("bearer"));
    }
}
