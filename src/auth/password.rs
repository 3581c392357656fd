use crate::types::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hashes a password using Argon2id.
///
/// Returns a PHC-formatted hash string with the salt and cost parameters
/// embedded, so it can be stored as-is. Every call draws a fresh salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against a PHC hash.
///
/// A malformed hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password hash is malformed: {}", e);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Runs [`hash_password`] on the blocking pool.
pub async fn hash_in_background(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn verify_in_background(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing() {
        let password = "test_password_123";

        let hash = hash_password(password).expect("should hash password");

        // Hash should not equal the original password
        assert_ne!(hash, password);

        // Hash should be in PHC format (starts with $argon2)
        assert!(hash.starts_with("$argon2"), "hash should be in PHC format");
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same").expect("should hash");
        let second = hash_password("same").expect("should hash");

        assert_ne!(first, second, "each hash should carry its own salt");
        assert!(verify_password("same", &first));
        assert!(verify_password("same", &second));
    }

    #[test]
    fn test_password_verification_success() {
        let password = "secure_password_456";

        let hash = hash_password(password).expect("should hash password");

        assert!(
            verify_password(password, &hash),
            "correct password should verify successfully"
        );
    }

    #[test]
    fn test_password_verification_failure() {
        let hash = hash_password("correct_password").expect("should hash password");

        assert!(
            !verify_password("wrong_password", &hash),
            "wrong password should fail verification"
        );
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        assert!(!verify_password("p", "not-a-phc-string"));
        assert!(!verify_password("p", ""));
        assert!(!verify_password("p", "p"));
    }

    #[tokio::test]
    async fn test_background_round_trip() {
        let hash = hash_in_background("p".to_string())
            .await
            .expect("should hash");

        assert!(verify_in_background("p".to_string(), hash.clone())
            .await
            .expect("should verify"));
        assert!(!verify_in_background("q".to_string(), hash)
            .await
            .expect("should verify"));
    }
}
