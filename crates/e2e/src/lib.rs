//! End-to-end harness for the holder lottery.
//!
//! Builds synthetic token-account blobs and scratch files so the draw can be
//! exercised from snapshot to on-disk audit record without a ledger node.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use lottery_primitives::constants::{ACCOUNT_AMOUNT, ACCOUNT_MINT, ACCOUNT_OWNER, CLASSIC_ACCOUNT_LEN};
use lottery_primitives::encode_address;

/// Mint used by every synthetic account.
pub const MINT_BYTE: u8 = 0xEE;

/// Classic-layout token account for the owner `[owner; 32]`.
#[must_use]
pub fn account_blob(owner: u8, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; CLASSIC_ACCOUNT_LEN];
    data[ACCOUNT_MINT].fill(MINT_BYTE);
    data[ACCOUNT_OWNER].fill(owner);
    data[ACCOUNT_AMOUNT].copy_from_slice(&amount.to_le_bytes());
    data
}

/// Base-58 address of the owner `[owner; 32]`.
#[must_use]
pub fn holder(owner: u8) -> String {
    encode_address(&[owner; 32])
}

/// Fresh per-test directory under the system temp dir.
///
/// Panics if the directory cannot be cleared or created.
#[must_use]
pub fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("holder-lottery-e2e-{}-{test}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("clear scratch dir");
    }
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
