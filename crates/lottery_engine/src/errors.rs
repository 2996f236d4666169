use core::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("no eligible entrants: check mint, exclusions and minimum balance")]
    NoEligibleEntrants,

    #[error("total ticket count is zero")]
    ZeroTotalTickets,

    #[error("ticket {ticket} is not inside any range (ranges cover [0, {total}))")]
    TicketOutOfRange { ticket: u128, total: u128 },

    #[error("ticket range overflow at entrant {index}")]
    TicketOverflow { index: usize },
}

/// Audit record field compared by a verification checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchField {
    TotalTickets,
    WinningTicket,
    Winner,
    SeedHash,
    SeedInt,
    /// Entrant at `index` is not strictly after its predecessor.
    EntrantOrder { index: usize },
    EntrantRange { index: usize },
}

impl fmt::Display for MismatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TotalTickets => f.write_str("metadata.total_supply"),
            Self::WinningTicket => f.write_str("metadata.winning_ticket"),
            Self::Winner => f.write_str("winner.address"),
            Self::SeedHash => f.write_str("metadata.seed_hash_hex"),
            Self::SeedInt => f.write_str("metadata.seed_int"),
            Self::EntrantOrder { index } => write!(f, "all_entrants[{index}].address"),
            Self::EntrantRange { index } => write!(f, "all_entrants[{index}]"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("{field} mismatch: audit={expected} recomputed={actual}")]
    Mismatch {
        field: MismatchField,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Draw(#[from] DrawError),
}

impl VerifyError {
    /// Field of the failed checkpoint, if this is a mismatch.
    #[must_use]
    pub const fn field(&self) -> Option<MismatchField> {
        match self {
            Self::Mismatch { field, .. } => Some(*field),
            Self::Draw(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuditCodecError {
    #[error("malformed audit record: {0}")]
    Json(#[from] serde_json::Error),
}
