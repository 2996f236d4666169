//! Ticket ranges, seed-derived ticket selection and winner resolution.

use lottery_primitives::{sha256, Hash256};
use primitive_types::U256;
use tracing::debug;

use crate::errors::DrawError;
use crate::snapshot::Entrant;

/// Half-open ticket interval `[start, end)` owned by one entrant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketRange {
    pub address: String,
    pub balance: u128,
    pub start: u128,
    pub end: u128,
}

impl TicketRange {
    #[must_use]
    pub const fn contains(&self, ticket: u128) -> bool {
        self.start <= ticket && ticket < self.end
    }
}

/// Assign contiguous ranges in entrant order. Returns the ranges and the
/// total ticket count (the final cursor).
pub fn build_ranges(entrants: &[Entrant]) -> Result<(Vec<TicketRange>, u128), DrawError> {
    let mut ranges = Vec::with_capacity(entrants.len());
    let mut cursor: u128 = 0;
    for (index, e) in entrants.iter().enumerate() {
        let end = cursor
            .checked_add(e.balance)
            .ok_or(DrawError::TicketOverflow { index })?;
        ranges.push(TicketRange {
            address: e.address.clone(),
            balance: e.balance,
            start: cursor,
            end,
        });
        cursor = end;
    }
    Ok((ranges, cursor))
}

/// Ticket derived from a seed, with the intermediate values a verifier
/// publishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketDraw {
    pub ticket: u128,
    pub seed_hash: Hash256,
    pub seed_int: U256,
}

impl TicketDraw {
    #[must_use]
    pub fn seed_hash_hex(&self) -> String {
        hex::encode(self.seed_hash)
    }
}

/// `ticket = int_be(SHA-256(seed)) mod total_tickets`.
pub fn select_ticket(seed: &str, total_tickets: u128) -> Result<TicketDraw, DrawError> {
    if total_tickets == 0 {
        return Err(DrawError::ZeroTotalTickets);
    }
    let seed_hash = sha256(seed.as_bytes());
    let seed_int = U256::from_big_endian(&seed_hash);
    // remainder < total_tickets <= u128::MAX
    let ticket = (seed_int % U256::from(total_tickets)).low_u128();
    Ok(TicketDraw { ticket, seed_hash, seed_int })
}

fn winner_position(ranges: &[TicketRange], ticket: u128) -> Result<usize, DrawError> {
    // first range whose end is strictly greater than the ticket
    let idx = ranges.partition_point(|r| r.end <= ticket);
    if idx >= ranges.len() {
        return Err(DrawError::TicketOutOfRange {
            ticket,
            total: ranges.last().map_or(0, |r| r.end),
        });
    }
    Ok(idx)
}

/// Binary search for the range containing `ticket`.
///
/// A ticket past the last range means it was computed against a different
/// total than these ranges imply; that is reported, never clamped.
pub fn resolve_winner(ranges: &[TicketRange], ticket: u128) -> Result<&TicketRange, DrawError> {
    winner_position(ranges, ticket).map(|i| &ranges[i])
}

/// Result of a full draw over an ordered entrant list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    pub ranges: Vec<TicketRange>,
    pub total_tickets: u128,
    pub draw: TicketDraw,
    pub winner_index: usize,
}

impl DrawOutcome {
    #[must_use]
    pub fn winner(&self) -> &TicketRange {
        &self.ranges[self.winner_index]
    }
}

/// Ranges → ticket → winner. Fails before hashing when nobody is eligible.
pub fn run_draw(seed: &str, entrants: &[Entrant]) -> Result<DrawOutcome, DrawError> {
    if entrants.is_empty() {
        return Err(DrawError::NoEligibleEntrants);
    }
    let (ranges, total_tickets) = build_ranges(entrants)?;
    let draw = select_ticket(seed, total_tickets)?;
    let winner_index = winner_position(&ranges, draw.ticket)?;
    debug!(
        entrants = ranges.len(),
        total_tickets,
        ticket = draw.ticket,
        winner = %ranges[winner_index].address,
        "draw resolved"
    );
    Ok(DrawOutcome { ranges, total_tickets, draw, winner_index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_entrants() -> Vec<Entrant> {
        vec![
            Entrant::new("Alice", 100),
            Entrant::new("Bob", 50),
            Entrant::new("Carol", 200),
        ]
    }

    #[test]
    fn ranges_for_three_entrants() {
        let (ranges, total) = build_ranges(&abc_entrants()).expect("ranges");
        assert_eq!(total, 350);
        let spans: Vec<(&str, u128, u128)> = ranges
            .iter()
            .map(|r| (r.address.as_str(), r.start, r.end))
            .collect();
        assert_eq!(spans, [("Alice", 0, 100), ("Bob", 100, 150), ("Carol", 150, 350)]);
    }

    #[test]
    fn ranges_empty_input() {
        let (ranges, total) = build_ranges(&[]).expect("ranges");
        assert!(ranges.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn ranges_overflow_is_reported() {
        let entrants = [Entrant::new("a", u128::MAX), Entrant::new("b", 1)];
        assert_eq!(build_ranges(&entrants), Err(DrawError::TicketOverflow { index: 1 }));
    }

    #[test]
    fn select_ticket_abc() {
        let d = select_ticket("abc", 350).expect("ticket");
        assert_eq!(
            d.seed_hash_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            d.seed_int.to_string(),
            "84342368487090800366523834928142263660104883695016514377462985829716817089965"
        );
        assert_eq!(d.ticket, 215);
        assert_eq!(select_ticket("abc", 1_000).expect("ticket").ticket, 965);
    }

    #[test]
    fn select_ticket_rejects_zero_total() {
        assert_eq!(select_ticket("abc", 0), Err(DrawError::ZeroTotalTickets));
    }

    #[test]
    fn resolve_boundaries() {
        let (ranges, _) = build_ranges(&abc_entrants()).expect("ranges");
        let who = |t| resolve_winner(&ranges, t).map(|r| r.address.as_str());
        assert_eq!(who(0), Ok("Alice"));
        assert_eq!(who(99), Ok("Alice"));
        assert_eq!(who(100), Ok("Bob"));
        assert_eq!(who(120), Ok("Bob"));
        assert_eq!(who(149), Ok("Bob"));
        assert_eq!(who(150), Ok("Carol"));
        assert_eq!(who(349), Ok("Carol"));
        assert_eq!(who(350), Err(DrawError::TicketOutOfRange { ticket: 350, total: 350 }));
    }

    #[test]
    fn resolve_on_empty_ranges_fails() {
        assert_eq!(
            resolve_winner(&[], 0),
            Err(DrawError::TicketOutOfRange { ticket: 0, total: 0 })
        );
    }

    #[test]
    fn run_draw_abc_picks_carol() {
        let out = run_draw("abc", &abc_entrants()).expect("draw");
        assert_eq!(out.total_tickets, 350);
        assert_eq!(out.draw.ticket, 215);
        assert_eq!(out.winner().address, "Carol");
        assert!(out.winner().contains(215));
    }

    #[test]
    fn run_draw_blockhash_seed_picks_bob() {
        let out = run_draw("GHtXQBsoZHVnNFa9YevAzFr17DJjgHXk3ycTKD5xD3Zi", &abc_entrants())
            .expect("draw");
        assert_eq!(out.draw.ticket, 104);
        assert_eq!(out.winner().address, "Bob");
    }

    #[test]
    fn run_draw_without_entrants_is_degenerate() {
        assert_eq!(run_draw("abc", &[]), Err(DrawError::NoEligibleEntrants));
    }
}
