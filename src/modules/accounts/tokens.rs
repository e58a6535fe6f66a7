use rand::RngCore;

use crate::CONFIRMATION_TOKEN_BYTES;

/// Source of unguessable single-use confirmation tokens
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Production token generator backed by the thread-local CSPRNG
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        // 32 random bytes hex-encoded: 256 bits of entropy per token,
        // carrying no identity or sequence information
        let mut bytes = [0u8; CONFIRMATION_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_length_and_charset() {
        let token = RandomTokenGenerator.generate();

        // 32 bytes become 64 hex characters
        assert_eq!(token.len(), CONFIRMATION_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let generator = RandomTokenGenerator;

        let mut seen = HashSet::new();
        for _ in 0..100 {
            assert!(
                seen.insert(generator.generate()),
                "Generated tokens should never repeat"
            );
        }
    }

    #[test]
    fn test_token_is_not_all_zeros() {
        let token = RandomTokenGenerator.generate();
        assert_ne!(token, "0".repeat(CONFIRMATION_TOKEN_BYTES * 2));
    }
}
