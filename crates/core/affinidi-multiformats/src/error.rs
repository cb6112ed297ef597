//! Encoding errors shared by the multibase and multihash codecs

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Cannot decode an empty multibase string")]
    EmptyInput,

    #[error("Unsupported multibase prefix: '{0}'")]
    UnsupportedPrefix(char),

    #[error("Invalid {base} encoding: {reason}")]
    InvalidEncoding { base: &'static str, reason: String },

    #[error("Multihash too short: {0} byte(s), need at least 2")]
    TooShort(usize),

    #[error("Unknown multihash code: 0x{0:02x}")]
    UnknownCode(u8),

    #[error("Multihash length mismatch for code 0x{code:02x}: expected {expected}, got {actual}")]
    LengthMismatch {
        code: u8,
        expected: usize,
        actual: usize,
    },

    #[error("Multihash digest truncated: expected {expected} byte(s), got {actual}")]
    DigestTruncated { expected: usize, actual: usize },

    #[error("Duplicate registry tag: {0}")]
    DuplicateTag(String),

    #[error("Unknown encoding name: {0}")]
    UnknownName(String),
}

impl EncodingError {
    pub fn invalid(base: &'static str, reason: impl fmt::Display) -> Self {
        Self::InvalidEncoding {
            base,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EncodingError>;
