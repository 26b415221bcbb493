use rand::distr::Alphanumeric;
use rand::Rng;

/// Opaque recovery-token generation.
///
/// Tokens are 32 characters from `[A-Za-z0-9]` drawn from a cryptographically
/// secure RNG, roughly 190 bits of entropy. Generation cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetTokenGenerator;

impl ResetTokenGenerator {
    pub const TOKEN_LENGTH: usize = 32;

    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh token value.
    pub fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(Self::TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length_and_alphabet() {
        let generator = ResetTokenGenerator::new();
        let token = generator.generate();

        assert_eq!(token.len(), ResetTokenGenerator::TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let generator = ResetTokenGenerator::new();
        let first = generator.generate();
        let second = generator.generate();

        assert_ne!(first, second);
    }
}
