#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

//! Holder Lottery - verifiable token-holder draw tooling
//!
//! This crate wires the deterministic engine (`lottery_engine`) to its
//! collaborators: ledger RPC, seed feed files, the public exclusion list,
//! audit record persistence and the command-line surface.

// Fixed public choices:
// - Seed: blockhash of the finalized block at the announced slot
// - Hash: SHA-256 over the seed's UTF-8 bytes
// - Ordering: entrants by address, raw byte order
// - Audit record: JSON, `metadata` / `winner` / `all_entrants`

pub mod audit_file;
pub mod config;
pub mod display;
pub mod errors;
pub mod exclusions;
pub mod pipeline;
pub mod predict;
pub mod rpc;
pub mod seed_feed;

pub use config::{LotteryParams, Settings};
pub use errors::{CliError, RpcError, SeedFeedError};
pub use lottery_engine::{
    aggregate, build_ranges, decode_account, filter_eligible, resolve_winner, run_draw,
    select_ticket, verify_audit, AuditContext, AuditRecord, DrawError, DrawOutcome, Entrant,
    MismatchField, OwnerBalances, TicketDraw, TicketRange, VerificationReport, VerifyError, U256,
};
pub use pipeline::{execute_draw, DrawInputs, DrawResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
