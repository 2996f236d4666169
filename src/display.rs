//! Console summaries. Display only; nothing here feeds back into a draw.

use std::fmt::Write as _;
use std::path::Path;

use lottery_engine::{AuditRecord, VerificationReport};

const RULE: &str = "----------------------------------------";
const BANNER: &str = "========================================";

/// Raw amount in whole tokens, one decimal place, half-up.
#[must_use]
pub fn to_tokens(raw: u128, decimals: u32) -> String {
    let scale = 10u128.saturating_pow(decimals);
    let tenths = raw.saturating_mul(10).saturating_add(scale / 2) / scale;
    format!("{}.{}", tenths / 10, tenths % 10)
}

#[must_use]
pub fn draw_summary(record: &AuditRecord, decimals: u32, out: &Path) -> String {
    let m = &record.metadata;
    let mut s = String::new();
    let _ = writeln!(s, "{BANNER}");
    let _ = writeln!(s, "VERIFIABLE SOLANA LOTTERY DRAW");
    let _ = writeln!(s, "{BANNER}");
    let _ = writeln!(s, "Mint           : {}", m.token_mint);
    let _ = writeln!(s, "Slot           : {}", m.target_slot);
    let _ = writeln!(s, "Seed           : {}", m.seed_blockhash);
    let _ = writeln!(s, "Seed SHA-256   : {}", m.seed_hash_hex);
    let _ = writeln!(s, "Entrants       : {}", record.all_entrants.len());
    let _ = writeln!(s, "Total tickets  : {}", to_tokens(m.total_supply, decimals));
    let _ = writeln!(s, "{RULE}");
    let _ = writeln!(s, "WINNER");
    let _ = writeln!(s, "Address        : {}", record.winner.address);
    let _ = writeln!(s, "Balance        : {}", to_tokens(record.winner.balance, decimals));
    let _ = writeln!(s, "Winning ticket : {}", to_tokens(m.winning_ticket, decimals));
    let _ = writeln!(s, "{RULE}");
    let _ = write!(s, "Wrote audit    : {}", out.display());
    s
}

#[must_use]
pub fn verify_summary(report: &VerificationReport, decimals: u32) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "AUDIT VERIFIED");
    let _ = writeln!(s, "Winner         : {}", report.winner);
    let _ = writeln!(s, "Winning ticket : {}", to_tokens(report.winning_ticket, decimals));
    let _ = writeln!(s, "Total tickets  : {}", to_tokens(report.total_tickets, decimals));
    let _ = writeln!(s, "Entrants       : {}", report.entrants);
    let _ = write!(s, "Seed SHA-256   : {}", report.seed_hash_hex);
    s
}
