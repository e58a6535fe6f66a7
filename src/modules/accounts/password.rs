use pbkdf2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};
use thiserror::Error;

use crate::{MAX_PASSWORD_LENGTH, PBKDF2_ROUNDS};

/// Errors produced while hashing or verifying passwords
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password exceeds the maximum supported length")]
    PasswordTooLong,
    #[error("stored password hash is malformed")]
    MalformedHash,
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
}

/// One-way salted password hashing with PBKDF2-HMAC-SHA256
pub struct PasswordHasher {
    rounds: u32,
}

impl PasswordHasher {
    pub fn new() -> Self {
        PasswordHasher {
            rounds: PBKDF2_ROUNDS,
        }
    }

    /// Constructor with a custom work factor, used to keep tests fast
    pub fn with_rounds(rounds: u32) -> Self {
        PasswordHasher { rounds }
    }

    /// Function to hash a plaintext password into a PHC format string
    pub fn hash(&self, plaintext: &str) -> Result<String, EncodingError> {
        if plaintext.is_empty() {
            return Err(EncodingError::EmptyPassword);
        }
        if plaintext.len() > MAX_PASSWORD_LENGTH {
            return Err(EncodingError::PasswordTooLong);
        }

        // Every hash gets its own random salt, so equal passwords never
        // produce equal hashes
        let salt = SaltString::generate(&mut rand::thread_rng());

        let params = Params {
            rounds: self.rounds,
            output_length: 32,
        };

        let hash = Pbkdf2
            .hash_password_customized(plaintext.as_bytes(), None, None, params, &salt)
            .map_err(|e| EncodingError::HashingFailed(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Function to check a plaintext password against a stored PHC string
    ///
    /// A mismatch is an ordinary `Ok(false)`; only an unparseable stored
    /// hash is reported as an error.
    pub fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, EncodingError> {
        let parsed = PasswordHash::new(stored).map_err(|_| EncodingError::MalformedHash)?;

        match Pbkdf2.verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(pbkdf2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(EncodingError::MalformedHash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> PasswordHasher {
        // Full-strength key stretching is pointless in unit tests
        PasswordHasher::with_rounds(1_000)
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hasher = test_hasher();
        let hash = hasher.hash("S3cret!").unwrap();

        assert!(hasher.verify("S3cret!", &hash).unwrap());
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_each_hash_gets_its_own_salt() {
        let hasher = test_hasher();
        let first = hasher.hash("S3cret!").unwrap();
        let second = hasher.hash("S3cret!").unwrap();

        // Same password, different salt, different hash
        assert_ne!(first, second);

        // Both still verify against the original password
        assert!(hasher.verify("S3cret!", &first).unwrap());
        assert!(hasher.verify("S3cret!", &second).unwrap());
    }

    #[test]
    fn test_hash_output_is_phc_formatted() {
        let hasher = test_hasher();
        let hash = hasher.hash("S3cret!").unwrap();

        assert!(hash.starts_with("$pbkdf2-sha256$"));
        assert!(hash.contains("i=1000"));
    }

    #[test]
    fn test_empty_password_rejected() {
        let hasher = test_hasher();
        assert!(matches!(hasher.hash(""), Err(EncodingError::EmptyPassword)));
    }

    #[test]
    fn test_oversized_password_rejected() {
        let hasher = test_hasher();
        let long_password = "x".repeat(MAX_PASSWORD_LENGTH + 1);
        assert!(matches!(
            hasher.hash(&long_password),
            Err(EncodingError::PasswordTooLong)
        ));
    }

    #[test]
    fn test_malformed_stored_hash_rejected() {
        let hasher = test_hasher();
        assert!(matches!(
            hasher.verify("anything", "not-a-phc-string"),
            Err(EncodingError::MalformedHash)
        ));
    }

    #[test]
    fn test_default_work_factor() {
        let hasher = PasswordHasher::new();
        assert_eq!(hasher.rounds, PBKDF2_ROUNDS);
    }
}
