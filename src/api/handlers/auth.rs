use crate::{
    api::handlers::{missing_fields, present, present_age, validate_age, validate_email},
    auth::password,
    db::UserField,
    types::{
        AppError, LoginRequest, MessageResponse, NewUser, RegisterRequest, Result, Role,
        TokenResponse,
    },
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

/// Register a new user with a password
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing fields, invalid email or invalid role"),
        (status = 500, description = "Error registering user")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(payload) = payload?;

    // Validate input
    let (Some(name), Some(email), Some(password), Some(age)) = (
        present(payload.name),
        present(payload.email),
        present(payload.password),
        present_age(payload.age),
    ) else {
        return Err(missing_fields());
    };
    validate_email(&email)?;
    let age = validate_age(age)?;
    let role = match present(payload.role) {
        Some(role) => role.parse::<Role>()?,
        None => Role::default(),
    };

    // Hash password
    let password_hash = password::hash_in_background(password).await?;

    // Create user
    let user = state
        .store
        .create_user(NewUser {
            name,
            email,
            age,
            password_hash: Some(password_hash),
            role,
        })
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid password"),
        (status = 404, description = "User not found")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let Json(payload) = payload?;

    let (Some(email), Some(password)) = (present(payload.email), present(payload.password))
    else {
        return Err(missing_fields());
    };

    // Get user
    let user = state
        .store
        .find_user_by(UserField::Email, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Verify password
    let Some(password_hash) = user.password_hash.clone() else {
        tracing::debug!(user_id = %user.id, "Login attempt for user without credentials");
        return Err(AppError::InvalidCredential);
    };
    if !password::verify_in_background(password, password_hash).await? {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::InvalidCredential);
    }

    // Generate token
    let tokens = state.auth_service.generate_token(&user.id, user.role)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(tokens))
}
