use crate::auth::jwt::AuthService;
use crate::types::{AppError, Identity, Result, Role};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authentication gate.
///
/// Verifies the bearer token and attaches the caller's [`Identity`] to the
/// request extensions. Every failure is the same 401 to the client; the
/// specific reason is only logged.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(&req)?;

    let claims = auth_service.verify_token(token)?;
    let identity = Identity::from(claims);

    tracing::debug!(user_id = %identity.user_id, role = %identity.role, "Request authenticated");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Result<&str> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthenticated("missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthenticated("authorization header is not ASCII".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("authorization scheme is not Bearer".to_string()))
}

/// Static set of roles allowed on a route.
#[derive(Debug, Clone)]
pub struct RoleGate {
    allowed: Arc<[Role]>,
}

impl RoleGate {
    pub fn new(allowed: &[Role]) -> Self {
        Self {
            allowed: allowed.into(),
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    /// Checks the identity's role snapshot against the allowed set.
    pub fn check(&self, identity: &Identity) -> Result<()> {
        if self.allows(identity.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "role '{}' is not in {:?}",
                identity.role, self.allowed
            )))
        }
    }
}

/// Authorization gate.
///
/// Must be layered inside [`auth_middleware`]: it reads the identity that
/// gate attached and does no verification of its own.
pub async fn require_roles(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response> {
    let identity = req.extensions().get::<Identity>().ok_or_else(|| {
        AppError::Unauthenticated("no identity attached to request".to_string())
    })?;

    gate.check(identity)?;

    Ok(next.run(req).await)
}

/// Extractor for the authenticated identity.
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthenticated("no identity attached to request".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::issue_token;
    use axum::{middleware, routing::get, Router};
    use axum_test::TestServer;

    const SECRET: &str = "middleware-test-secret-32-characters";

    fn identity(role: Role) -> Identity {
        Identity {
            user_id: "user-1".to_string(),
            role,
        }
    }

    async fn whoami(AuthUser(identity): AuthUser) -> String {
        format!("{}:{}", identity.user_id, identity.role)
    }

    fn test_server(allowed: &[Role]) -> TestServer {
        let auth_service = Arc::new(AuthService::new(SECRET.to_string(), 900));

        let app = Router::new()
            .route("/open", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                auth_middleware,
            ))
            .merge(
                Router::new()
                    .route("/gated", get(whoami))
                    .route_layer(middleware::from_fn_with_state(
                        RoleGate::new(allowed),
                        require_roles,
                    ))
                    .route_layer(middleware::from_fn_with_state(
                        auth_service,
                        auth_middleware,
                    )),
            );

        TestServer::new(app).expect("Failed to create test server")
    }

    #[test]
    fn test_role_gate_rejects_user_for_admin_route() {
        let gate = RoleGate::new(&[Role::Admin]);

        let err = gate.check(&identity(Role::User)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_role_gate_passes_admin_for_admin_route() {
        let gate = RoleGate::new(&[Role::Admin]);

        assert!(gate.check(&identity(Role::Admin)).is_ok());
    }

    #[test]
    fn test_role_gate_with_multiple_roles() {
        let gate = RoleGate::new(&[Role::Admin, Role::Owner]);

        assert!(gate.allows(Role::Owner));
        assert!(gate.allows(Role::Admin));
        assert!(!gate.allows(Role::User));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthenticated() {
        let server = test_server(&[Role::Admin]);

        let response = server.get("/open").await;
        response.assert_status_unauthorized();

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Unauthenticated");
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthenticated() {
        let server = test_server(&[Role::Admin]);
        let token = issue_token("user-1", Role::User, SECRET, 900).unwrap();

        let response = server
            .get("/open")
            .add_header("Authorization", format!("Basic {}", token))
            .await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthenticated() {
        let server = test_server(&[Role::Admin]);
        let token = issue_token("user-1", Role::User, SECRET, 0).unwrap();

        let response = server
            .get("/open")
            .add_header("Authorization", format!("Bearer {}", token))
            .await;
        response.assert_status_unauthorized();

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Unauthenticated");
    }

    #[tokio::test]
    async fn test_foreign_secret_is_unauthenticated() {
        let server = test_server(&[Role::Admin]);
        let token =
            issue_token("user-1", Role::User, "some-other-secret-of-32-characters", 900).unwrap();

        let response = server
            .get("/open")
            .add_header("Authorization", format!("Bearer {}", token))
            .await;
        response.assert_status_unauthorized();

        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Unauthenticated");
    }

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let server = test_server(&[Role::Admin]);
        let token = issue_token("user-42", Role::Owner, SECRET, 900).unwrap();

        let response = server
            .get("/open")
            .add_header("Authorization", format!("Bearer {}", token))
            .await;
        response.assert_status_ok();
        response.assert_text("user-42:owner");
    }

    #[tokio::test]
    async fn test_role_gate_forbids_insufficient_role() {
        let server = test_server(&[Role::Admin]);
        let token = issue_token("user-1", Role::User, SECRET, 900).unwrap();

        let response = server
            .get("/gated")
            .add_header("Authorization", format!("Bearer {}", token))
            .await;
        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_role_gate_passes_allowed_role() {
        let server = test_server(&[Role::Admin]);
        let token = issue_token("admin-1", Role::Admin, SECRET, 900).unwrap();

        let response = server
            .get("/gated")
            .add_header("Authorization", format!("Bearer {}", token))
            .await;
        response.assert_status_ok();
        response.assert_text("admin-1:admin");
    }

    #[tokio::test]
    async fn test_role_gate_runs_after_authentication() {
        let server = test_server(&[Role::Admin]);

        // No token: the authentication gate answers before the role check.
        server.get("/gated").await.assert_status_unauthorized();
    }
}
