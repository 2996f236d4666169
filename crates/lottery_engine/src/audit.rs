//! Audit record wire format and replay verification.
//!
//! The JSON shape (`metadata`, `winner`, `all_entrants`) is the durable
//! contract published with every draw. Key names are fixed; `seed_int` is a
//! decimal string because it exceeds every JSON-safe integer width.

use chrono::{DateTime, Utc};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::draw::{build_ranges, resolve_winner, select_ticket, DrawOutcome};
use crate::errors::{AuditCodecError, MismatchField, VerifyError};
use crate::snapshot::Entrant;
use crate::{AUDIT_FORMAT_VERSION, AUDIT_TOOL_NAME};

const RPC_URL_REDACTED: &str = "(set via env/cli; not embedded)";

fn default_tool() -> String {
    AUDIT_TOOL_NAME.to_owned()
}

fn default_redacted() -> String {
    RPC_URL_REDACTED.to_owned()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMetadata {
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default)]
    pub version: String,
    pub generated_at_utc: DateTime<Utc>,
    #[serde(default = "default_redacted")]
    pub rpc_url_redacted: String,
    pub token_mint: String,
    pub target_slot: u64,
    pub seed_blockhash: String,
    #[serde(default)]
    pub seed_source: String,
    pub seed_hash_hex: String,
    pub seed_int: String,
    pub min_raw_balance: u128,
    #[serde(default)]
    pub excluded_wallets_file: Option<String>,
    /// Total ticket count (sum of entrant balances).
    pub total_supply: u128,
    pub winning_ticket: u128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWinner {
    pub address: String,
    pub balance: u128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntrant {
    pub address: String,
    pub balance: u128,
    pub start_ticket: u128,
    pub end_ticket: u128,
}

/// Self-contained record of one draw. Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub metadata: AuditMetadata,
    pub winner: AuditWinner,
    pub all_entrants: Vec<AuditEntrant>,
}

/// Draw-time facts that are not derivable from the outcome itself.
#[derive(Clone, Debug)]
pub struct AuditContext {
    pub token_mint: String,
    pub target_slot: u64,
    pub seed_source: String,
    pub min_raw_balance: u128,
    pub excluded_wallets_file: Option<String>,
    pub generated_at_utc: DateTime<Utc>,
}

impl AuditRecord {
    #[must_use]
    pub fn from_outcome(seed: &str, outcome: &DrawOutcome, ctx: AuditContext) -> Self {
        let winner = outcome.winner();
        Self {
            metadata: AuditMetadata {
                tool: default_tool(),
                version: AUDIT_FORMAT_VERSION.to_owned(),
                generated_at_utc: ctx.generated_at_utc,
                rpc_url_redacted: default_redacted(),
                token_mint: ctx.token_mint,
                target_slot: ctx.target_slot,
                seed_blockhash: seed.to_owned(),
                seed_source: ctx.seed_source,
                seed_hash_hex: outcome.draw.seed_hash_hex(),
                seed_int: outcome.draw.seed_int.to_string(),
                min_raw_balance: ctx.min_raw_balance,
                excluded_wallets_file: ctx.excluded_wallets_file,
                total_supply: outcome.total_tickets,
                winning_ticket: outcome.draw.ticket,
            },
            winner: AuditWinner {
                address: winner.address.clone(),
                balance: winner.balance,
            },
            all_entrants: outcome
                .ranges
                .iter()
                .map(|r| AuditEntrant {
                    address: r.address.clone(),
                    balance: r.balance,
                    start_ticket: r.start,
                    end_ticket: r.end,
                })
                .collect(),
        }
    }

    /// Entrants in stored order, ranges dropped.
    #[must_use]
    pub fn entrants(&self) -> Vec<Entrant> {
        self.all_entrants
            .iter()
            .map(|e| Entrant::new(e.address.clone(), e.balance))
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, AuditCodecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Two-space indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, AuditCodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Values recomputed by [`verify_audit`]; none are copied from the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationReport {
    pub seed_hash_hex: String,
    pub seed_int: U256,
    pub winner: String,
    pub winner_balance: u128,
    pub winning_ticket: u128,
    pub total_tickets: u128,
    pub entrants: usize,
}

fn check<T>(field: MismatchField, expected: &T, actual: &T) -> Result<(), VerifyError>
where
    T: PartialEq + ToString + ?Sized,
{
    if expected == actual {
        return Ok(());
    }
    Err(VerifyError::Mismatch {
        field,
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

/// Replay ranges, ticket and winner from the record and compare each to the
/// stored value. Fails at the first mismatching checkpoint.
///
/// Checkpoint order: total tickets, winning ticket, winner address, then
/// seed hash, seed integer, entrant ordering and each entrant's stored range.
pub fn verify_audit(record: &AuditRecord) -> Result<VerificationReport, VerifyError> {
    let meta = &record.metadata;
    let entrants = record.entrants();

    let (ranges, total) = build_ranges(&entrants)?;
    check(MismatchField::TotalTickets, &meta.total_supply, &total)?;

    let draw = select_ticket(&meta.seed_blockhash, total)?;
    check(MismatchField::WinningTicket, &meta.winning_ticket, &draw.ticket)?;

    let winner = resolve_winner(&ranges, draw.ticket)?;
    check(MismatchField::Winner, record.winner.address.as_str(), winner.address.as_str())?;

    let seed_hash_hex = draw.seed_hash_hex();
    check(MismatchField::SeedHash, meta.seed_hash_hex.as_str(), seed_hash_hex.as_str())?;
    check(MismatchField::SeedInt, meta.seed_int.as_str(), draw.seed_int.to_string().as_str())?;

    // strictly ascending byte order also rules out duplicate addresses
    for (index, pair) in record.all_entrants.windows(2).enumerate() {
        let (prev, cur) = (&pair[0].address, &pair[1].address);
        if prev.as_bytes() >= cur.as_bytes() {
            return Err(VerifyError::Mismatch {
                field: MismatchField::EntrantOrder { index: index + 1 },
                expected: format!("address after {prev}"),
                actual: cur.clone(),
            });
        }
    }

    for (index, (stored, range)) in record.all_entrants.iter().zip(&ranges).enumerate() {
        let stored_span = (stored.start_ticket, stored.end_ticket);
        let span = (range.start, range.end);
        if stored_span != span {
            return Err(VerifyError::Mismatch {
                field: MismatchField::EntrantRange { index },
                expected: format!("[{}, {})", stored_span.0, stored_span.1),
                actual: format!("[{}, {})", span.0, span.1),
            });
        }
    }

    debug!(winner = %winner.address, ticket = draw.ticket, total, "audit replay matched");
    Ok(VerificationReport {
        seed_hash_hex,
        seed_int: draw.seed_int,
        winner: winner.address.clone(),
        winner_balance: winner.balance,
        winning_ticket: draw.ticket,
        total_tickets: total,
        entrants: ranges.len(),
    })
}
