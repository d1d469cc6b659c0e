//! Short codes for public project links (`/p/{code}`).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default number of characters in a short code.
pub const DEFAULT_SHORT_CODE_LENGTH: usize = 8;

/// Default short code alphabet (lowercase alphanumeric).
pub const DEFAULT_SHORT_CODE_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// How many codes project creation draws before giving up.
pub const MAX_SHORT_CODE_ATTEMPTS: u32 = 10;

/// Length and alphabet of generated short codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortCodeConfig {
    pub length: usize,
    pub charset: String,
}

impl Default for ShortCodeConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_SHORT_CODE_LENGTH,
            charset: DEFAULT_SHORT_CODE_CHARSET.to_string(),
        }
    }
}

impl ShortCodeConfig {
    /// Reject configurations that cannot produce a usable code.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.length == 0 {
            return Err(CoreError::Validation(
                "Short code length must be at least 1".into(),
            ));
        }
        if self.charset.is_empty() {
            return Err(CoreError::Validation(
                "Short code charset must not be empty".into(),
            ));
        }
        if self.charset.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(CoreError::Validation(
                "Short code charset must not contain whitespace or '/'".into(),
            ));
        }
        Ok(())
    }
}

/// Draw a fresh short code from the thread-local CSPRNG.
///
/// Uniqueness is not guaranteed; the caller retries on collision.
pub fn generate_short_code(config: &ShortCodeConfig) -> String {
    let alphabet: Vec<char> = config.charset.chars().collect();
    let mut rng = rand::rng();
    (0..config.length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())])
        .collect()
}

/// `true` iff `code` has exactly the configured length and uses only
/// characters from the configured charset.
pub fn is_valid_short_code(code: &str, config: &ShortCodeConfig) -> bool {
    code.chars().count() == config.length && code.chars().all(|c| config.charset.contains(c))
}
