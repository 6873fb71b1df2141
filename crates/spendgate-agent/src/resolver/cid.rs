//! Content-addressed program identifiers (IPFS CIDs).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidError {
    #[error("empty cid")]
    Empty,
    #[error("CIDv0 must be 46 base58 characters starting with Qm: {0}")]
    BadV0(String),
    #[error("CIDv1 must be lowercase base32 with the 'b' multibase prefix: {0}")]
    BadV1(String),
    #[error("unrecognised cid encoding: {0}")]
    Unknown(String),
}

/// Validated CID. Only the textual form is kept; it is submitted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cid(String);

impl Cid {
    pub fn parse(s: &str) -> Result<Self, CidError> {
        if s.is_empty() {
            return Err(CidError::Empty);
        }
        if s.starts_with("Qm") {
            if s.len() != 46 || !s.chars().all(|c| BASE58_ALPHABET.contains(c)) {
                return Err(CidError::BadV0(s.to_string()));
            }
            return Ok(Self(s.to_string()));
        }
        if let Some(rest) = s.strip_prefix('b') {
            let base32 = |c: char| c.is_ascii_lowercase() || ('2'..='7').contains(&c);
            if rest.len() < 8 || !rest.chars().all(base32) {
                return Err(CidError::BadV1(s.to_string()));
            }
            return Ok(Self(s.to_string()));
        }
        Err(CidError::Unknown(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
