use std::path::PathBuf;

use lottery_engine::{AuditCodecError, DrawError, VerifyError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedFeedError {
    #[error("block feed file is empty")]
    Empty,

    #[error("block feed file is not valid JSON or raw string: {0}")]
    NotJson(String),

    #[error("block feed slot is not an integer: {0}")]
    InvalidSlot(String),

    #[error("block feed slot mismatch: file slot={file_slot} vs expected slot={expected}")]
    SlotMismatch { file_slot: u64, expected: u64 },

    #[error(
        "could not find a blockhash in block feed file; expected raw string or JSON with \
         blockhash/result.blockhash/blocks[slot].blockhash"
    )]
    NoBlockhash,
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error from {method}: {detail}")]
    Node { method: &'static str, detail: String },

    #[error("{method} returned no result")]
    EmptyResult { method: &'static str },

    #[error("slot {slot}: getBlock returned no blockhash")]
    MissingBlockhash { slot: u64 },

    #[error("timestamp not available for slot {slot}")]
    MissingBlockTime { slot: u64 },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("seed resolution failed: {0}")]
    Seed(#[from] SeedFeedError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("draw failed: {0}")]
    Draw(#[from] DrawError),

    #[error("audit verification failed: {0}")]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    AuditCodec(#[from] AuditCodecError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid time {0:?}: expected HH:MM (24h)")]
    InvalidTime(String),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
