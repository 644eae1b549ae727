//! Student registration code (`DD-DDDDD`).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ASCII only: `\d` would also accept other Unicode decimal digits.
static SR_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[0-9]{5}$").expect("SR code pattern is valid"));

/// Returns true if `candidate` is exactly two digits, a hyphen, five digits.
pub fn is_valid_sr_code(candidate: &str) -> bool {
    SR_CODE_PATTERN.is_match(candidate)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid SR code '{0}'")]
pub struct InvalidSrCode(pub String);

/// A validated student code. The only way to build one is through [`SrCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SrCode(String);

impl SrCode {
    pub fn parse(candidate: &str) -> Result<Self, InvalidSrCode> {
        if is_valid_sr_code(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(InvalidSrCode(candidate.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SrCode {
    type Error = InvalidSrCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_sr_code(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidSrCode(value))
        }
    }
}

impl From<SrCode> for String {
    fn from(code: SrCode) -> Self {
        code.0
    }
}

impl AsRef<str> for SrCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
