use crate::{
    auth::middleware::AuthUser,
    types::{MessageResponse, Result},
};
use axum::Json;

/// Area reserved for admins. Access is enforced by the route's role gate.
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Caller holds the admin role", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not permitted")
    ),
    tag = "roles",
    security(("bearer" = []))
)]
pub async fn admin_area(AuthUser(identity): AuthUser) -> Result<Json<MessageResponse>> {
    tracing::debug!(user_id = %identity.user_id, "Admin area accessed");
    Ok(Json(MessageResponse::new("Welcome, admin")))
}

/// Area reserved for owners. Access is enforced by the route's role gate.
#[utoipa::path(
    get,
    path = "/owner",
    responses(
        (status = 200, description = "Caller holds the owner role", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role not permitted")
    ),
    tag = "roles",
    security(("bearer" = []))
)]
pub async fn owner_area(AuthUser(identity): AuthUser) -> Result<Json<MessageResponse>> {
    tracing::debug!(user_id = %identity.user_id, "Owner area accessed");
    Ok(Json(MessageResponse::new("Welcome, owner")))
}
