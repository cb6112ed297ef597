use affinidi_multiformats::multihash::{self, parse, sum};
use affinidi_multiformats::{Algorithm, Base, EncodingError, Multihash};
use sha2::{Digest, Sha256, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

fn expected_digest(alg: Algorithm, data: &[u8]) -> Vec<u8> {
    match alg {
        Algorithm::Sha2_256 => Sha256::digest(data).to_vec(),
        Algorithm::Sha2_512 => Sha512::digest(data).to_vec(),
        Algorithm::Sha3_512 => Sha3_512::digest(data).to_vec(),
        Algorithm::Sha3_384 => Sha3_384::digest(data).to_vec(),
        Algorithm::Sha3_256 => Sha3_256::digest(data).to_vec(),
        Algorithm::Sha3_224 => Sha3_224::digest(data).to_vec(),
    }
}

/// Test: each frame is code, length, then the standard digest.
#[test]
fn sum_every_algorithm() {
    let data = b"hello world";
    for alg in Algorithm::all() {
        let frame = sum(*alg, data);
        assert_eq!(frame[0], alg.code());
        assert_eq!(frame[1] as usize, alg.digest_length());
        assert_eq!(&frame[2..], expected_digest(*alg, data).as_slice(), "{alg}");
    }
}

#[test]
fn sha2_256_frame_layout() {
    let frame = sum(Algorithm::Sha2_256, b"abc");
    assert_eq!(frame.len(), 34);
    assert_eq!(frame[0], multihash::SHA2_256);
    assert_eq!(frame[1], 0x20);
    assert_eq!(&frame[2..], Sha256::digest(b"abc").as_slice());
}

#[test]
fn table_codes_and_lengths() {
    let table = [
        (Algorithm::Sha2_256, 0x12, 32),
        (Algorithm::Sha2_512, 0x13, 64),
        (Algorithm::Sha3_512, 0x14, 64),
        (Algorithm::Sha3_384, 0x15, 48),
        (Algorithm::Sha3_256, 0x16, 32),
        (Algorithm::Sha3_224, 0x17, 28),
    ];
    for (alg, code, len) in table {
        assert_eq!(alg.code(), code);
        assert_eq!(alg.digest_length(), len);
    }
}

#[test]
fn codes_are_unique() {
    let mut codes: Vec<u8> = Algorithm::all().iter().map(|a| a.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), Algorithm::all().len());
}

/// Test: hashing in pieces gives the same frame as hashing at once.
#[test]
fn incremental_hasher() {
    for alg in Algorithm::all() {
        let mut hasher = alg.hasher();
        assert_eq!(hasher.algorithm(), *alg);
        for chunk in b"a different input".chunks(3) {
            hasher.update(chunk);
        }
        assert_eq!(hasher.finalize_multihash(), alg.sum(b"a different input"));
    }
}

#[test]
fn parse_returns_algorithm() {
    for alg in Algorithm::all() {
        assert_eq!(parse(&alg.sum(b"data")).unwrap(), *alg);
    }
}

/// Test: any declared length other than 32 breaks a sha2-256 frame.
#[test]
fn corrupted_length_byte() {
    let frame = sum(Algorithm::Sha2_256, b"test");
    for length in (0..=u8::MAX).filter(|l| *l != 32) {
        let mut corrupted = frame.clone();
        corrupted[1] = length;
        assert!(matches!(
            parse(&corrupted).unwrap_err(),
            EncodingError::LengthMismatch { code: 0x12, expected: 32, .. }
        ));
    }
}

#[test]
fn truncated_frames() {
    let frame = sum(Algorithm::Sha3_512, b"test");
    for cut in 2..frame.len() {
        assert_eq!(
            parse(&frame[..cut]).unwrap_err(),
            EncodingError::DigestTruncated {
                expected: 64,
                actual: cut - 2
            }
        );
    }
}

#[test]
fn short_and_unknown() {
    assert_eq!(parse(&[]).unwrap_err(), EncodingError::TooShort(0));
    assert_eq!(parse(&[0x12]).unwrap_err(), EncodingError::TooShort(1));
    assert_eq!(
        parse(&[0x11, 0x14]).unwrap_err(),
        EncodingError::UnknownCode(0x11)
    );
}

/// Test: a multihash survives a multibase round trip and still verifies.
#[test]
fn multibase_wrapped_multihash() {
    let frame = sum(Algorithm::Sha2_256, b"wrapped");
    let mh = Multihash::from_bytes(&frame).unwrap();

    for base in Base::all() {
        let text = mh.to_multibase(*base);
        let decoded = affinidi_multiformats::decode(&text).unwrap();
        let parsed = Multihash::from_bytes(&decoded).unwrap();
        assert_eq!(parsed.algorithm(), Algorithm::Sha2_256);
        assert!(parsed.verify(b"wrapped"));
    }
}

#[test]
fn serde_names() {
    let json = serde_json::to_string(&Algorithm::Sha3_224).unwrap();
    assert_eq!(json, "\"sha3-224\"");
    let alg: Algorithm = serde_json::from_str("\"sha2-512\"").unwrap();
    assert_eq!(alg, Algorithm::Sha2_512);
    assert!(serde_json::from_str::<Algorithm>("\"md5\"").is_err());
}
