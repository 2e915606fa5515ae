use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The 62 symbols a short code may be built from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated short codes unless configured otherwise.
pub const DEFAULT_LENGTH: usize = 6;

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 32;

/// A validated short code identifier for a shortened URL.
///
/// Short codes are 1-32 characters drawn from `[a-zA-Z0-9]`. Comparison is
/// case-sensitive and codes are never normalized.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortCode(String);

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (generators or rows read back from storage).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Checks that `length` is a usable code length.
    pub fn validate_length(length: usize) -> Result<usize, CoreError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(CoreError::InvalidLength {
                length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }
        Ok(length)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl TryFrom<String> for ShortCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortCode> for String {
    fn from(value: ShortCode) -> Self {
        value.0
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_base62() {
        assert_eq!(ALPHABET.len(), 62);
        assert!(ALPHABET.iter().all(u8::is_ascii_alphanumeric));

        let mut sorted = ALPHABET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 62);
    }

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("a").is_ok());
        assert!(ShortCode::new("Abc123").is_ok());
        assert!(ShortCode::new("Z".repeat(32)).is_ok());
    }

    #[test]
    fn empty_or_too_long() {
        assert!(ShortCode::new("").is_err());
        assert!(ShortCode::new("a".repeat(33)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abc def").is_err());
        assert!(ShortCode::new("abc-12").is_err());
        assert!(ShortCode::new("abc@#$").is_err());
        assert!(ShortCode::new("ab/cd").is_err());
        assert!(ShortCode::new("äbcdef").is_err());
    }

    #[test]
    fn codes_are_case_sensitive() {
        let lower = ShortCode::new("abcdef").unwrap();
        let upper = ShortCode::new("ABCDEF").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn length_bounds() {
        assert_eq!(ShortCode::validate_length(6), Ok(6));
        assert_eq!(ShortCode::validate_length(32), Ok(32));
        assert!(matches!(
            ShortCode::validate_length(0),
            Err(CoreError::InvalidLength { length: 0, .. })
        ));
        assert!(ShortCode::validate_length(33).is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let code = ShortCode::new("Xy7Qa1").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"Xy7Qa1\"");

        let parsed: ShortCode = serde_json::from_str("\"Xy7Qa1\"").unwrap();
        assert_eq!(parsed, code);

        assert!(serde_json::from_str::<ShortCode>("\"not valid\"").is_err());
    }
}
