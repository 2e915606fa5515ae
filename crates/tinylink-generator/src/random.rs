use crate::Generator;
use rand::distr::Alphanumeric;
use rand::Rng;
use tinylink_core::shortcode::DEFAULT_LENGTH;
use tinylink_core::{CoreError, ShortCode};

/// Generates fixed-length base62 codes from a cryptographically secure RNG.
///
/// Every character is drawn independently and uniformly from `[a-zA-Z0-9]`
/// using the thread-local ChaCha-based generator, which is periodically
/// reseeded from the operating system. If the OS entropy source fails the
/// generator panics; there is nothing a caller could retry.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of `length` characters.
    pub fn new(length: usize) -> Result<Self, CoreError> {
        Ok(Self {
            length: ShortCode::validate_length(length)?,
        })
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tinylink_core::shortcode::ALPHABET;

    #[test]
    fn default_length_is_six() {
        let generator = RandomGenerator::default();
        for _ in 0..1000 {
            let code = generator.generate();
            assert_eq!(code.as_str().len(), 6);
            assert!(code.as_str().bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn honours_configured_length() {
        let generator = RandomGenerator::new(12).unwrap();
        let code = generator.generate();
        assert_eq!(code.as_str().len(), 12);
        assert!(ShortCode::new(code.as_str()).is_ok());
    }

    #[test]
    fn rejects_invalid_length() {
        assert!(RandomGenerator::new(0).is_err());
        assert!(RandomGenerator::new(33).is_err());
    }

    #[test]
    fn covers_the_whole_alphabet() {
        let generator = RandomGenerator::default();
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            seen.extend(generator.generate().as_str().bytes());
        }
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn codes_do_not_repeat() {
        let generator = RandomGenerator::default();
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generator.generate()));
        }
    }

    #[test]
    fn source_is_a_crypto_rng() {
        fn assert_crypto_rng<R: rand::CryptoRng>(_: &R) {}
        assert_crypto_rng(&rand::rng());
    }
}
