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
    clippy::missing_panics_doc,
    clippy::result_large_err
)]

//! Holder lottery engine: deterministic selection and verification.
//!
//! Pipeline at draw time:
//!
//! ```text
//! raw account blobs ─ aggregate ─ filter_eligible ─ build_ranges ─┐
//!                                     seed ─ select_ticket ───────┼─ resolve_winner
//! ```
//!
//! [`verify_audit`] replays `build_ranges → select_ticket → resolve_winner`
//! from the entrants embedded in an [`AuditRecord`], with no dependency on
//! the aggregation step or on any live ledger state.
//
// Public contract (any third party must be able to reproduce it):
// - Entrants sorted by address, raw byte order of the base-58 string
// - Ticket ranges half-open, contiguous, starting at 0, width = balance
// - seed_int = SHA-256(UTF-8 seed) as a big-endian 256-bit integer
// - ticket = seed_int mod total_tickets

pub mod audit;
pub mod draw;
pub mod errors;
pub mod snapshot;

pub use audit::{
    verify_audit, AuditContext, AuditEntrant, AuditMetadata, AuditRecord, AuditWinner,
    VerificationReport,
};
pub use draw::{build_ranges, resolve_winner, run_draw, select_ticket, DrawOutcome, TicketDraw, TicketRange};
pub use errors::{AuditCodecError, DrawError, MismatchField, VerifyError};
pub use snapshot::{aggregate, decode_account, filter_eligible, BalanceRecord, Entrant, OwnerBalances};

pub use primitive_types::U256;

/// Audit record format version written into `metadata.version`.
pub const AUDIT_FORMAT_VERSION: &str = "1.0.0";

/// Tool name written into `metadata.tool`.
pub const AUDIT_TOOL_NAME: &str = "solana-verifiable-lottery";
