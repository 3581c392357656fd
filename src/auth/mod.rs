//! Credentials, Tokens and Access Gates
//!
//! This module provides the authentication and authorization layer of the
//! usergate API: password hashing, JWT identity tokens and the two Axum
//! middlewares that guard protected routes.
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - Argon2id hashing and verification
//! - [`auth::jwt`](crate::auth::jwt) - JWT token issuance, verification and claims
//! - [`auth::middleware`](crate::auth::middleware) - Authentication and role gates, extractors
//!
//! # Security Features
//!
//! - **Password Hashing**: Uses Argon2id (memory-hard) with a per-hash salt
//! - **JWT Tokens**: HS256 signed tokens with configurable expiration
//! - **Claims**: Subject user id plus a snapshot of the user's role
//!
//! # Usage
//!
//! ## Token Generation
//!
//! ```ignore
//! use usergate::auth::jwt::AuthService;
//! use usergate::types::Role;
//!
//! let auth = AuthService::new(jwt_secret, 3600);
//! let tokens = auth.generate_token(&user.id, user.role)?;
//! ```
//!
//! ## Middleware
//!
//! The authentication gate verifies the bearer token and injects an
//! `Identity`; the role gate then checks it against a static role set:
//!
//! ```ignore
//! use axum::middleware;
//! use usergate::auth::middleware::{auth_middleware, require_roles, RoleGate};
//!
//! let admin = Router::new()
//!     .route("/admin", get(handler))
//!     .route_layer(middleware::from_fn_with_state(RoleGate::new(&[Role::Admin]), require_roles))
//!     .route_layer(middleware::from_fn_with_state(auth_service, auth_middleware));
//! ```
//!
//! ## Extracting the Identity in Handlers
//!
//! ```ignore
//! async fn protected_handler(AuthUser(identity): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", identity.user_id)
//! }
//! ```
//!
//! # Configuration
//!
//! Configure via `usergate.toml`:
//! ```toml
//! [auth]
//! jwt_secret_env = "JWT_SECRET"  # Env var holding the signing secret (min 32 chars)
//! jwt_expiry_secs = 3600         # Token validity duration
//! ```

/// JWT token issuance and verification.
pub mod jwt;
/// Authentication and authorization middleware and extractors for protected routes.
pub mod middleware;
/// Password hashing and verification.
pub mod password;
