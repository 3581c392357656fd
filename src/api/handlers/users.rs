use crate::{
    api::handlers::{missing_fields, present, present_age, validate_age, validate_email},
    auth::{middleware::AuthUser, password},
    db::UserField,
    types::{AppError, CreateUserRequest, NewUser, Result, Role, UpdateUserRequest, User, UserUpdate},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// Create a user record.
///
/// Open to anonymous callers. A supplied password is hashed before it is
/// stored; without one the user exists but cannot log in.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing fields or invalid email"),
        (status = 500, description = "Error creating user")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(payload) = payload?;

    let (Some(name), Some(email), Some(age)) = (
        present(payload.name),
        present(payload.email),
        present_age(payload.age),
    ) else {
        return Err(missing_fields());
    };
    validate_email(&email)?;
    let age = validate_age(age)?;

    let password_hash = match present(payload.password) {
        Some(password) => Some(password::hash_in_background(password).await?),
        None => None,
    };

    let user = state
        .store
        .create_user(NewUser {
            name,
            email,
            age,
            password_hash,
            role: Role::User,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<User>>> {
    let users = state.store.list_users().await?;

    tracing::debug!(requested_by = %identity.user_id, count = users.len(), "Listed users");

    Ok(Json(users))
}

/// Get a single user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>> {
    state
        .store
        .find_user_by(UserField::Id, &id)
        .await?
        .map(Json)
        .ok_or_else(user_not_found)
}

/// Update name, email or age of a user.
///
/// Absent or empty fields, and an age of 0, keep their stored value.
/// Password and role cannot be changed here.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid email"),
        (status = 404, description = "User not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(payload) = payload?;

    // Existence is checked before any field, so a missing id is always a 404.
    let current = state
        .store
        .find_user_by(UserField::Id, &id)
        .await?
        .ok_or_else(user_not_found)?;

    let update = UserUpdate {
        name: present(payload.name),
        email: present(payload.email),
        age: present_age(payload.age).map(validate_age).transpose()?,
    };
    if let Some(email) = &update.email {
        validate_email(email)?;
    }

    let user = if update.is_empty() {
        current
    } else {
        state
            .store
            .update_user(&id, update)
            .await?
            .ok_or_else(user_not_found)?
    };

    tracing::info!(user_id = %user.id, updated_by = %identity.user_id, "User updated");

    Ok(Json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(("bearer" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let deleted = state.store.delete_user(&id).await?;

    if deleted == 0 {
        return Err(user_not_found());
    }

    tracing::info!(user_id = %id, deleted_by = %identity.user_id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
