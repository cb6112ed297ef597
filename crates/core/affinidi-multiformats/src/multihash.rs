//! Multihash framing
//!
//! A multihash is a digest prefixed with the code of the algorithm that
//! produced it and the digest length:
//!
//! ```text
//! code (1 byte) | length (1 byte) | digest (length bytes)
//! ```
//!
//! Only single-byte codes are supported.
//!
//! See: <https://github.com/multiformats/multihash>

use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use sha2::digest::DynDigest;
use sha2::{Sha256, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use tracing::debug;

use crate::EncodingError;
use crate::error::Result;
use crate::multibase::Base;
use crate::registry::{Registry, Tagged};

// ****************************************************************************
// Multihash codes
// See: https://github.com/multiformats/multicodec/blob/master/table.csv
// ****************************************************************************
pub const SHA2_256: u8 = 0x12;
pub const SHA2_512: u8 = 0x13;
pub const SHA3_512: u8 = 0x14;
pub const SHA3_384: u8 = 0x15;
pub const SHA3_256: u8 = 0x16;
pub const SHA3_224: u8 = 0x17;

const HEADER_LEN: usize = 2;

static REGISTRY: LazyLock<Registry<Algorithm>> = LazyLock::new(|| {
    Registry::new(Algorithm::ALL)
        .unwrap_or_else(|e| panic!("built-in multihash table is inconsistent: {e}"))
});

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "sha2-256")]
    Sha2_256,
    #[serde(rename = "sha2-512")]
    Sha2_512,
    #[serde(rename = "sha3-512")]
    Sha3_512,
    #[serde(rename = "sha3-384")]
    Sha3_384,
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha3-224")]
    Sha3_224,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Sha2_256,
        Algorithm::Sha2_512,
        Algorithm::Sha3_512,
        Algorithm::Sha3_384,
        Algorithm::Sha3_256,
        Algorithm::Sha3_224,
    ];

    /// Multihash code of the algorithm
    pub const fn code(self) -> u8 {
        match self {
            Algorithm::Sha2_256 => SHA2_256,
            Algorithm::Sha2_512 => SHA2_512,
            Algorithm::Sha3_512 => SHA3_512,
            Algorithm::Sha3_384 => SHA3_384,
            Algorithm::Sha3_256 => SHA3_256,
            Algorithm::Sha3_224 => SHA3_224,
        }
    }

    /// Digest length in bytes
    pub const fn digest_length(self) -> usize {
        match self {
            Algorithm::Sha2_256 | Algorithm::Sha3_256 => 32,
            Algorithm::Sha3_224 => 28,
            Algorithm::Sha3_384 => 48,
            Algorithm::Sha2_512 | Algorithm::Sha3_512 => 64,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Sha2_256 => "sha2-256",
            Algorithm::Sha2_512 => "sha2-512",
            Algorithm::Sha3_512 => "sha3-512",
            Algorithm::Sha3_384 => "sha3-384",
            Algorithm::Sha3_256 => "sha3-256",
            Algorithm::Sha3_224 => "sha3-224",
        }
    }

    pub fn from_code(code: u8) -> Option<Algorithm> {
        REGISTRY.lookup(code)
    }

    /// Every registered algorithm, in table order
    pub fn all() -> &'static [Algorithm] {
        REGISTRY.all()
    }

    /// Creates a fresh incremental hasher
    pub fn hasher(self) -> Hasher {
        let inner: Box<dyn DynDigest + Send + Sync> = match self {
            Algorithm::Sha2_256 => Box::new(Sha256::default()),
            Algorithm::Sha2_512 => Box::new(Sha512::default()),
            Algorithm::Sha3_512 => Box::new(Sha3_512::default()),
            Algorithm::Sha3_384 => Box::new(Sha3_384::default()),
            Algorithm::Sha3_256 => Box::new(Sha3_256::default()),
            Algorithm::Sha3_224 => Box::new(Sha3_224::default()),
        };
        Hasher {
            algorithm: self,
            inner,
        }
    }

    /// Hashes `data` and returns the framed multihash
    pub fn sum(self, data: &[u8]) -> Vec<u8> {
        let mut hasher = self.hasher();
        hasher.update(data);
        hasher.finalize_multihash()
    }
}

impl Tagged for Algorithm {
    type Tag = u8;

    fn tag(&self) -> u8 {
        self.code()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| EncodingError::UnknownName(s.to_string()))
    }
}

/// Incremental hasher for one [`Algorithm`]
pub struct Hasher {
    algorithm: Algorithm,
    inner: Box<dyn DynDigest + Send + Sync>,
}

impl Hasher {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Returns the bare digest
    pub fn finalize(self) -> Vec<u8> {
        self.inner.finalize().into_vec()
    }

    /// Returns the digest framed as a multihash
    pub fn finalize_multihash(self) -> Vec<u8> {
        let algorithm = self.algorithm;
        let digest = self.finalize();
        debug_assert_eq!(digest.len(), algorithm.digest_length());

        let mut out = Vec::with_capacity(HEADER_LEN + digest.len());
        out.push(algorithm.code());
        out.push(digest.len() as u8);
        out.extend(digest);
        out
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Hasher")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Hashes `data` with `algorithm` and returns `code || length || digest`
pub fn sum(algorithm: Algorithm, data: &[u8]) -> Vec<u8> {
    algorithm.sum(data)
}

/// Validates a multihash header and returns its algorithm
///
/// Bytes following the digest are not inspected; use [`Multihash::from_bytes`]
/// for an exact match.
pub fn parse(frame: &[u8]) -> Result<Algorithm> {
    let [code, length, digest @ ..] = frame else {
        debug!(len = frame.len(), "multihash too short");
        return Err(EncodingError::TooShort(frame.len()));
    };
    let (code, length) = (*code, *length as usize);

    let Some(algorithm) = Algorithm::from_code(code) else {
        debug!(code, "unknown multihash code");
        return Err(EncodingError::UnknownCode(code));
    };

    if length != algorithm.digest_length() {
        debug!(
            code,
            expected = algorithm.digest_length(),
            actual = length,
            "multihash length mismatch"
        );
        return Err(EncodingError::LengthMismatch {
            code,
            expected: algorithm.digest_length(),
            actual: length,
        });
    }

    if digest.len() < length {
        debug!(
            code,
            expected = length,
            actual = digest.len(),
            "multihash digest truncated"
        );
        return Err(EncodingError::DigestTruncated {
            expected: length,
            actual: digest.len(),
        });
    }

    Ok(algorithm)
}

/// A validated multihash (borrowed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multihash<'a> {
    algorithm: Algorithm,
    bytes: &'a [u8],
}

impl<'a> Multihash<'a> {
    /// Validates `frame`, which must hold exactly one multihash
    pub fn from_bytes(frame: &'a [u8]) -> Result<Self> {
        let algorithm = parse(frame)?;
        let digest_len = frame.len() - HEADER_LEN;
        if digest_len != algorithm.digest_length() {
            return Err(EncodingError::LengthMismatch {
                code: algorithm.code(),
                expected: algorithm.digest_length(),
                actual: digest_len,
            });
        }

        Ok(Self {
            algorithm,
            bytes: frame,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Digest bytes (without the header)
    pub fn digest(&self) -> &'a [u8] {
        &self.bytes[HEADER_LEN..]
    }

    /// Returns the raw bytes, including the header
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns true if `data` hashes to this digest
    pub fn verify(&self, data: &[u8]) -> bool {
        let mut hasher = self.algorithm.hasher();
        hasher.update(data);
        hasher.finalize() == self.digest()
    }

    /// Encodes the whole frame as a multibase string
    pub fn to_multibase(&self, base: Base) -> String {
        base.encode(self.bytes)
    }
}
