//! # Match Codes
//!
//! Short shareable identifiers used by non-creator users to locate a match.

use crate::errors::EntityError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alphabet for generated codes.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Fixed code length.
pub const MATCH_CODE_LEN: usize = 6;

/// A six-character uppercase alphanumeric match code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MatchCode(String);

impl MatchCode {
    /// Generate a random code.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..MATCH_CODE_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parse user input. Lowercase input is accepted and normalized.
    pub fn parse(input: &str) -> Result<Self, EntityError> {
        let code = input.trim().to_ascii_uppercase();
        let valid = code.len() == MATCH_CODE_LEN && code.bytes().all(|b| ALPHABET.contains(&b));
        if !valid {
            return Err(EntityError::InvalidMatchCode(input.to_string()));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MatchCode {
    type Error = EntityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MatchCode> for String {
    fn from(code: MatchCode) -> Self {
        code.0
    }
}

impl fmt::Display for MatchCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_code_is_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let code = MatchCode::generate(&mut rng);
            assert_eq!(code.as_str().len(), MATCH_CODE_LEN);
            assert!(MatchCode::parse(code.as_str()).is_ok());
        }
    }

    #[test]
    fn test_parse_normalizes_case() {
        let code = MatchCode::parse(" ab12cd ").unwrap();
        assert_eq!(code.as_str(), "AB12CD");
    }

    #[test]
    fn test_parse_rejects_bad_codes() {
        assert!(MatchCode::parse("ABC").is_err());
        assert!(MatchCode::parse("ABCDEFG").is_err());
        assert!(MatchCode::parse("AB-12C").is_err());
    }

    #[test]
    fn test_serde_rejects_invalid_code() {
        let parsed: Result<MatchCode, _> = serde_json::from_str("\"nope\"");
        assert!(parsed.is_err());
    }
}
