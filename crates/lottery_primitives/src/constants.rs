#![forbid(unsafe_code)]

use core::ops::Range;

/// Classic SPL Token program.
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
/// Token-2022 (extension-capable) program.
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

// Token account layout: mint(0..32) | owner(32..64) | amount(64..72) | ...
pub const ACCOUNT_MINT: Range<usize> = 0..32;
pub const ACCOUNT_OWNER: Range<usize> = 32..64;
pub const ACCOUNT_AMOUNT: Range<usize> = 64..72;
pub const ACCOUNT_MIN_LEN: usize = 72;

/// Fixed size of a classic token account; Token-2022 accounts may be longer.
pub const CLASSIC_ACCOUNT_LEN: usize = 165;

/// Hash published alongside every draw.
pub const SEED_HASH_ALGORITHM: &str = "SHA-256";
