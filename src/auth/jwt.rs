use crate::types::{AppError, Claims, Result, Role, TokenResponse};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

/// Reasons a presented token is refused.
///
/// These stay server-side; clients only ever see a generic 401.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature does not match")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token could not be parsed")]
    Malformed,
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        AppError::Unauthenticated(e.to_string())
    }
}

/// Signs an HS256 token for `user_id` carrying `role`, valid for `ttl_secs`.
pub fn issue_token(user_id: &str, role: Role, secret: &str, ttl_secs: i64) -> Result<String> {
    let now = Utc::now();
    let expires_at = Duration::try_seconds(ttl_secs)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::Internal(format!("Token lifetime out of range: {}s", ttl_secs))
        })?;
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Verifies signature and expiry of `token` and returns its claims.
///
/// The signature is checked before expiry, so a tampered token reports
/// [`TokenError::Invalid`] even when it is also stale. A token is expired
/// from the second named in `exp` onwards.
pub fn verify_token(token: &str, secret: &str) -> std::result::Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below without leeway.
    validation.validate_exp = false;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::Invalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    })?;

    if Utc::now().timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Authentication service for identity token issuance and verification.
///
/// Holds the signing secret and token lifetime from configuration. Both are
/// read-only after startup and shared across requests.
pub struct AuthService {
    jwt_secret: String,
    token_expiry: i64,
}

impl AuthService {
    /// Creates a new AuthService with the given configuration.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing JWTs (should be at least 32 chars)
    /// * `token_expiry` - Token validity in seconds
    pub fn new(jwt_secret: String, token_expiry: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry,
        }
    }

    /// Token validity in seconds.
    pub fn token_expiry(&self) -> i64 {
        self.token_expiry
    }

    /// Generates a token for a user with the role they hold right now.
    pub fn generate_token(&self, user_id: &str, role: Role) -> Result<TokenResponse> {
        let token = issue_token(user_id, role, &self.jwt_secret, self.token_expiry)?;

        Ok(TokenResponse {
            token,
            expires_in: self.token_expiry,
        })
    }

    /// Verifies a JWT token and returns the claims.
    pub fn verify_token(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        verify_token(token, &self.jwt_secret)
    }
}
