//! Self-describing multiformat encodings for Affinidi TDK
//!
//! This crate provides:
//! - Multibase encoding/decoding: a leading prefix character identifies which
//!   base alphabet encodes the rest of the string (base2 through base64url)
//! - Multihash framing: a `(code, length)` header identifies the hash algorithm
//!   and digest size (SHA-2 and SHA-3 families)
//!
//! Both lookup tables are immutable and shared across threads.

pub mod multibase;
pub mod multihash;
pub mod registry;

pub use multibase::{Base, BaseCodec, decode, decode_with_base, encode};
pub use multihash::{Algorithm, Hasher, Multihash};

mod error;
pub use error::{EncodingError, Result};
