//! Fixed-radix codecs
//!
//! Bases whose symbols map to a whole number of bits (base2, base16, base32,
//! base64) never need big-integer arithmetic. The byte-oriented ones delegate
//! to `hex`, `data-encoding` and `base64`; upper/lower variants share one
//! conversion and differ only in a case transform applied after encoding.

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use data_encoding::{BASE32_NOPAD, BASE32HEX_NOPAD};

use super::codec::{BaseCodec, Case};
use crate::{EncodingError, error::Result};

/// Symbol table used by a [`FixedRadix`] codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// `0-9a-f`
    Hex,
    /// RFC 4648 base32
    Base32,
    /// RFC 4648 base32 with extended hex alphabet
    Base32Hex,
    /// RFC 4648 URL and filename safe base64
    Base64Url,
}

impl Alphabet {
    pub const fn symbols(self) -> &'static str {
        match self {
            Alphabet::Hex => "0123456789abcdef",
            Alphabet::Base32 => "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567",
            Alphabet::Base32Hex => "0123456789ABCDEFGHIJKLMNOPQRSTUV",
            Alphabet::Base64Url => {
                "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_"
            }
        }
    }

    pub const fn bits_per_symbol(self) -> usize {
        match self {
            Alphabet::Hex => 4,
            Alphabet::Base32 | Alphabet::Base32Hex => 5,
            Alphabet::Base64Url => 6,
        }
    }

    /// Case the underlying codec reads and writes, `None` if case-sensitive
    const fn native_case(self) -> Option<Case> {
        match self {
            Alphabet::Hex => Some(Case::Lower),
            Alphabet::Base32 | Alphabet::Base32Hex => Some(Case::Upper),
            Alphabet::Base64Url => None,
        }
    }
}

/// Padding-free codec over a power-of-two alphabet
#[derive(Debug)]
pub struct FixedRadix {
    name: &'static str,
    alphabet: Alphabet,
    case: Option<Case>,
}

impl FixedRadix {
    pub const fn new(name: &'static str, alphabet: Alphabet, case: Option<Case>) -> Self {
        Self {
            name,
            alphabet,
            case,
        }
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Length of the encoded body for `len` input bytes
    pub fn encoded_len(&self, len: usize) -> usize {
        (len * 8).div_ceil(self.alphabet.bits_per_symbol())
    }
}

impl BaseCodec for FixedRadix {
    fn name(&self) -> &'static str {
        self.name
    }

    fn encode(&self, data: &[u8]) -> String {
        let encoded = match self.alphabet {
            Alphabet::Hex => hex::encode(data),
            Alphabet::Base32 => BASE32_NOPAD.encode(data),
            Alphabet::Base32Hex => BASE32HEX_NOPAD.encode(data),
            Alphabet::Base64Url => BASE64_URL_SAFE_NO_PAD.encode(data),
        };

        match self.case {
            Some(case) => case.apply(encoded),
            None => encoded,
        }
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>> {
        let text = match self.alphabet.native_case() {
            Some(case) => case.normalize(text),
            None => text.into(),
        };

        match self.alphabet {
            Alphabet::Hex => {
                hex::decode(text.as_bytes()).map_err(|e| EncodingError::invalid(self.name, e))
            }
            Alphabet::Base32 => BASE32_NOPAD
                .decode(text.as_bytes())
                .map_err(|e| EncodingError::invalid(self.name, e)),
            Alphabet::Base32Hex => BASE32HEX_NOPAD
                .decode(text.as_bytes())
                .map_err(|e| EncodingError::invalid(self.name, e)),
            Alphabet::Base64Url => BASE64_URL_SAFE_NO_PAD
                .decode(text.as_bytes())
                .map_err(|e| EncodingError::invalid(self.name, e)),
        }
    }
}

/// base2: eight `0`/`1` symbols per byte, most significant bit first
#[derive(Debug)]
pub struct Binary;

impl BaseCodec for Binary {
    fn name(&self) -> &'static str {
        "base2"
    }

    fn encode(&self, data: &[u8]) -> String {
        let mut out = String::with_capacity(data.len() * 8);
        for byte in data {
            for shift in (0..8).rev() {
                out.push(if (byte >> shift) & 1 == 1 { '1' } else { '0' });
            }
        }
        out
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>> {
        let bits = text.as_bytes();
        if !bits.len().is_multiple_of(8) {
            return Err(EncodingError::invalid(
                self.name(),
                format!("length {} is not a multiple of 8", bits.len()),
            ));
        }

        bits.chunks(8)
            .enumerate()
            .map(|(chunk, symbols)| {
                symbols
                    .iter()
                    .enumerate()
                    .try_fold(0u8, |acc, (offset, symbol)| match symbol {
                        b'0' => Ok(acc << 1),
                        b'1' => Ok((acc << 1) | 1),
                        _ => Err(EncodingError::invalid(
                            self.name(),
                            format!("invalid binary digit at index {}", chunk * 8 + offset),
                        )),
                    })
            })
            .collect()
    }
}
