//! Multibase encoding/decoding
//!
//! Multibase is a protocol for self-describing base encodings.
//! The first character indicates the encoding used.
//!
//! See: <https://github.com/multiformats/multibase>

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::EncodingError;
use crate::error::Result;
use crate::registry::{Registry, Tagged};

pub mod codec;
pub mod fixed;
pub mod radix;

pub use codec::{BaseCodec, Case};
pub use fixed::{Alphabet, Binary, FixedRadix};
pub use radix::BigRadix;

const DIGITS_36: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
const BITCOIN: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

static BASE2: Binary = Binary;
static BASE8: BigRadix = BigRadix::new("base8", "01234567", None);
static BASE10: BigRadix = BigRadix::new("base10", "0123456789", None);
static BASE16: FixedRadix = FixedRadix::new("base16", Alphabet::Hex, Some(Case::Lower));
static BASE16_UPPER: FixedRadix =
    FixedRadix::new("base16upper", Alphabet::Hex, Some(Case::Upper));
static BASE32: FixedRadix = FixedRadix::new("base32", Alphabet::Base32, Some(Case::Lower));
static BASE32_UPPER: FixedRadix =
    FixedRadix::new("base32upper", Alphabet::Base32, Some(Case::Upper));
static BASE32_HEX: FixedRadix =
    FixedRadix::new("base32hex", Alphabet::Base32Hex, Some(Case::Lower));
static BASE32_HEX_UPPER: FixedRadix =
    FixedRadix::new("base32hexupper", Alphabet::Base32Hex, Some(Case::Upper));
static BASE36: BigRadix = BigRadix::new("base36", DIGITS_36, Some(Case::Lower));
static BASE36_UPPER: BigRadix = BigRadix::new("base36upper", DIGITS_36, Some(Case::Upper));
static BASE58_BTC: BigRadix = BigRadix::new("base58btc", BITCOIN, None);
static BASE64_URL: FixedRadix = FixedRadix::new("base64url", Alphabet::Base64Url, None);

static REGISTRY: LazyLock<Registry<Base>> = LazyLock::new(|| {
    Registry::new(Base::ALL)
        .unwrap_or_else(|e| panic!("built-in multibase table is inconsistent: {e}"))
});

/// Supported multibase encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    #[serde(rename = "base2")]
    Base2,
    #[serde(rename = "base8")]
    Base8,
    #[serde(rename = "base10")]
    Base10,
    #[serde(rename = "base16")]
    Base16,
    #[serde(rename = "base16upper")]
    Base16Upper,
    #[serde(rename = "base32")]
    Base32,
    #[serde(rename = "base32upper")]
    Base32Upper,
    #[serde(rename = "base32hex")]
    Base32Hex,
    #[serde(rename = "base32hexupper")]
    Base32HexUpper,
    #[serde(rename = "base36")]
    Base36,
    #[serde(rename = "base36upper")]
    Base36Upper,
    #[serde(rename = "base58btc")]
    Base58Btc,
    #[serde(rename = "base64url")]
    Base64Url,
}

impl Base {
    pub const ALL: [Base; 13] = [
        Base::Base2,
        Base::Base8,
        Base::Base10,
        Base::Base16,
        Base::Base16Upper,
        Base::Base32,
        Base::Base32Upper,
        Base::Base32Hex,
        Base::Base32HexUpper,
        Base::Base36,
        Base::Base36Upper,
        Base::Base58Btc,
        Base::Base64Url,
    ];

    /// Multibase prefix character
    pub const fn tag(self) -> char {
        match self {
            Base::Base2 => '0',
            Base::Base8 => '7',
            Base::Base10 => '9',
            Base::Base16 => 'f',
            Base::Base16Upper => 'F',
            Base::Base32 => 'b',
            Base::Base32Upper => 'B',
            Base::Base32Hex => 'v',
            Base::Base32HexUpper => 'V',
            Base::Base36 => 'k',
            Base::Base36Upper => 'K',
            Base::Base58Btc => 'z',
            Base::Base64Url => 'u',
        }
    }

    /// The codec that converts this base's body
    pub fn codec(self) -> &'static dyn BaseCodec {
        match self {
            Base::Base2 => &BASE2,
            Base::Base8 => &BASE8,
            Base::Base10 => &BASE10,
            Base::Base16 => &BASE16,
            Base::Base16Upper => &BASE16_UPPER,
            Base::Base32 => &BASE32,
            Base::Base32Upper => &BASE32_UPPER,
            Base::Base32Hex => &BASE32_HEX,
            Base::Base32HexUpper => &BASE32_HEX_UPPER,
            Base::Base36 => &BASE36,
            Base::Base36Upper => &BASE36_UPPER,
            Base::Base58Btc => &BASE58_BTC,
            Base::Base64Url => &BASE64_URL,
        }
    }

    /// Canonical multibase name, e.g. `base58btc`
    pub fn name(self) -> &'static str {
        self.codec().name()
    }

    /// Looks up the encoding registered for a prefix character
    pub fn from_tag(tag: char) -> Option<Base> {
        REGISTRY.lookup(tag)
    }

    /// Every registered encoding, in table order
    pub fn all() -> &'static [Base] {
        REGISTRY.all()
    }

    /// Encodes `data` and prepends the multibase prefix
    pub fn encode(self, data: &[u8]) -> String {
        let body = self.codec().encode(data);
        let mut out = String::with_capacity(body.len() + self.tag().len_utf8());
        out.push(self.tag());
        out.push_str(&body);
        out
    }

    /// Decodes a body that does not carry the multibase prefix
    pub fn decode(self, body: &str) -> Result<Vec<u8>> {
        self.codec().decode(body)
    }
}

impl Tagged for Base {
    type Tag = char;

    fn tag(&self) -> char {
        Base::tag(*self)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Base {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        Base::ALL
            .into_iter()
            .find(|base| base.name() == s)
            .ok_or_else(|| EncodingError::UnknownName(s.to_string()))
    }
}

/// Encodes `data` with `base`, prefixed with the base's tag
pub fn encode(base: Base, data: &[u8]) -> String {
    base.encode(data)
}

/// Decodes a multibase string, using its first character to pick the base
pub fn decode(text: &str) -> Result<Vec<u8>> {
    decode_with_base(text).map(|(_, data)| data)
}

/// Like [`decode`], also returning the base that was detected
pub fn decode_with_base(text: &str) -> Result<(Base, Vec<u8>)> {
    let mut chars = text.chars();
    let Some(tag) = chars.next() else {
        return Err(EncodingError::EmptyInput);
    };

    let Some(base) = Base::from_tag(tag) else {
        debug!(prefix = %tag, "unsupported multibase prefix");
        return Err(EncodingError::UnsupportedPrefix(tag));
    };

    let data = base.decode(chars.as_str()).inspect_err(|e| {
        debug!(base = base.name(), error = %e, "multibase body rejected");
    })?;
    Ok((base, data))
}
