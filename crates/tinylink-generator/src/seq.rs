use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use tinylink_core::shortcode::{ALPHABET, DEFAULT_LENGTH};
use tinylink_core::{CoreError, ShortCode};

/// A deterministic generator that base62-encodes a counter.
///
/// This generator produces fixed-width codes like "AAAAAA", "AAAAAB", etc.
/// The codes are trivially guessable, so it is meant for tests and
/// reproducible local setups, never for a public deployment.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    length: usize,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            length: self.length,
        }
    }
}

impl SeqGenerator {
    /// Creates a sequential generator producing codes of `length` characters.
    pub fn new(length: usize) -> Result<Self, CoreError> {
        Self::with_offset(length, 0)
    }

    /// Creates a sequential generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(length: usize, offset: u64) -> Result<Self, CoreError> {
        Ok(Self {
            counter: AtomicU64::new(offset),
            length: ShortCode::validate_length(length)?,
        })
    }

    fn encode(&self, mut value: u64) -> String {
        let base = ALPHABET.len() as u64;
        let mut buf = vec![ALPHABET[0]; self.length];
        for slot in buf.iter_mut().rev() {
            *slot = ALPHABET[(value % base) as usize];
            value /= base;
        }
        // The buffer only ever holds ASCII bytes from `ALPHABET`.
        buf.into_iter().map(char::from).collect()
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self {
            counter: AtomicU64::new(0),
            length: DEFAULT_LENGTH,
        }
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(self.encode(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::default();

        assert_eq!(generator.generate().as_str(), "AAAAAA");
        assert_eq!(generator.generate().as_str(), "AAAAAB");
        assert_eq!(generator.generate().as_str(), "AAAAAC");
    }

    #[test]
    fn with_offset_carries_into_next_digit() {
        let generator = SeqGenerator::with_offset(6, 62).unwrap();

        assert_eq!(generator.generate().as_str(), "AAAABA");
        assert_eq!(generator.generate().as_str(), "AAAABB");
    }

    #[test]
    fn wraps_around_the_code_space() {
        let generator = SeqGenerator::with_offset(1, 61).unwrap();

        assert_eq!(generator.generate().as_str(), "9");
        assert_eq!(generator.generate().as_str(), "A");
    }

    #[test]
    fn codes_are_valid() {
        let generator = SeqGenerator::with_offset(4, 1_000_000).unwrap();
        for _ in 0..100 {
            let code = generator.generate();
            assert!(ShortCode::new(code.as_str()).is_ok());
        }
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SeqGenerator>();
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::default();
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        assert_eq!(generator.generate().as_str(), "AAAAAC");
        assert_eq!(cloned.generate().as_str(), "AAAAAC");
    }
}
