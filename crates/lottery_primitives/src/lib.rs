#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

//! Holder lottery primitives: hashing, address encoding, token account layout.
//
// Everything here is part of the public verification contract:
//
// - SHA-256 over the seed's UTF-8 bytes (no domain tag, no framing)
// - Base-58 (Bitcoin alphabet) for 32-byte ledger addresses
// - Little-endian fixed-width integer reads from account data

use sha2::{Digest, Sha256};
use thiserror::Error;

/// 32-byte hash (SHA-256 output).
pub type Hash256 = [u8; 32];

/// 32-byte raw public key of a ledger account.
pub type Pubkey32 = [u8; 32];

pub mod constants;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("invalid base-58 address {address:?}: {reason}")]
    InvalidBase58 { address: String, reason: String },

    #[error("invalid address length: expected {expected} got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// Plain SHA-256 of `data`.
#[must_use]
pub fn sha256(data: &[u8]) -> Hash256 {
    let digest = Sha256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Read a `u64` from the first 8 bytes of a little-endian byte slice.
///
/// Missing trailing bytes read as zero.
#[must_use]
pub fn u64_from_le(b: &[u8]) -> u64 {
    let mut x: u64 = 0;
    let mut i = 0usize;
    while i < 8 && i < b.len() {
        x |= u64::from(b[i]) << (8 * i as u64);
        i += 1;
    }
    x
}

/// Encode raw key bytes as a base-58 address string.
#[must_use]
pub fn encode_address(key: &[u8]) -> String {
    bs58::encode(key).into_string()
}

/// Decode a base-58 address string into its 32 raw key bytes.
pub fn decode_address(address: &str) -> Result<Pubkey32, PrimitiveError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| PrimitiveError::InvalidBase58 {
            address: address.to_owned(),
            reason: e.to_string(),
        })?;
    if bytes.len() != 32 {
        return Err(PrimitiveError::InvalidLength { expected: 32, got: bytes.len() });
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// True when `address` decodes to exactly 32 bytes.
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    decode_address(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u64_from_le_short_input_zero_extends() {
        assert_eq!(u64_from_le(&[0x01, 0x02]), 0x0201);
        assert_eq!(u64_from_le(&[]), 0);
        assert_eq!(u64_from_le(&[0xFF; 12]), u64::MAX);
    }

    #[test]
    fn address_roundtrip_preserves_leading_zeros() {
        let mut key = [7u8; 32];
        key[0] = 0;
        key[1] = 0;
        let addr = encode_address(&key);
        assert!(addr.starts_with("11"));
        assert_eq!(decode_address(&addr), Ok(key));
    }

    #[test]
    fn decode_rejects_wrong_length_and_alphabet() {
        assert_eq!(
            decode_address("abc"),
            Err(PrimitiveError::InvalidLength { expected: 32, got: 3 })
        );
        // '0', 'O', 'I' and 'l' are not in the alphabet
        assert!(matches!(
            decode_address("0OIl"),
            Err(PrimitiveError::InvalidBase58 { .. })
        ));
    }
}
