//! Codec trait implemented by every multibase alphabet family

use std::borrow::Cow;

use crate::error::Result;

/// A reversible mapping between bytes and text in one base alphabet
///
/// Implementations deal with the body only; the multibase prefix is handled by
/// [`crate::multibase::Base`].
pub trait BaseCodec: Send + Sync {
    /// Canonical multibase name, e.g. `base58btc`
    fn name(&self) -> &'static str;

    /// Encodes `data`. Empty input yields an empty string.
    fn encode(&self, data: &[u8]) -> String;

    /// Decodes `text`. Empty input yields an empty vector.
    fn decode(&self, text: &str) -> Result<Vec<u8>>;
}

/// Letter case of the encoded text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Lower,
    Upper,
}

impl Case {
    /// Rewrites freshly encoded text into this case
    pub fn apply(self, text: String) -> String {
        match self {
            Case::Lower if text.bytes().any(|b| b.is_ascii_uppercase()) => {
                text.to_ascii_lowercase()
            }
            Case::Upper if text.bytes().any(|b| b.is_ascii_lowercase()) => {
                text.to_ascii_uppercase()
            }
            _ => text,
        }
    }

    /// Brings input text into this case before alphabet lookup
    pub fn normalize(self, text: &str) -> Cow<'_, str> {
        match self {
            Case::Lower if text.bytes().any(|b| b.is_ascii_uppercase()) => {
                Cow::Owned(text.to_ascii_lowercase())
            }
            Case::Upper if text.bytes().any(|b| b.is_ascii_lowercase()) => {
                Cow::Owned(text.to_ascii_uppercase())
            }
            _ => Cow::Borrowed(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(Case::Upper.apply("ab12cd".to_string()), "AB12CD");
        assert_eq!(Case::Lower.apply("AB12CD".to_string()), "ab12cd");
        assert_eq!(Case::Lower.apply("ab12cd".to_string()), "ab12cd");
    }

    #[test]
    fn test_normalize_borrows_when_unchanged() {
        assert!(matches!(Case::Upper.normalize("ABC234"), Cow::Borrowed(_)));
        assert!(matches!(Case::Upper.normalize("abc234"), Cow::Owned(s) if s == "ABC234"));
    }
}
