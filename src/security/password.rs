/// Credential hashing and verification using bcrypt
use crate::error::{AppError, Result};

/// Fixed work factor for all stored credentials.
const BCRYPT_COST: u32 = 12;

/// Hash a plaintext password. Each call salts independently, so hashing the
/// same password twice yields different strings.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("hunter22").expect("should hash");
        assert!(verify_password("hunter22", &hash).expect("should verify"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let hash = hash_password("hunter22").expect("should hash");
        assert!(!verify_password("hunter23", &hash).expect("should verify"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let h1 = hash_password("hunter22").expect("should hash");
        let h2 = hash_password("hunter22").expect("should hash");
        assert_ne!(h1, h2);
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        assert!(matches!(
            verify_password("hunter22", "not-a-bcrypt-hash"),
            Err(AppError::Internal(_))
        ));
    }
}
