//! Balance snapshot: account decoding, per-owner aggregation and eligibility.

use std::collections::{BTreeMap, BTreeSet};

use lottery_primitives::constants::{ACCOUNT_AMOUNT, ACCOUNT_MIN_LEN, ACCOUNT_OWNER};
use lottery_primitives::{encode_address, u64_from_le};
use tracing::{debug, trace};

/// Owner address → summed raw balance across all of the owner's token accounts.
pub type OwnerBalances = BTreeMap<String, u128>;

/// One decoded token account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceRecord {
    pub owner: String,
    pub amount: u64,
}

/// A holder that survived exclusion and minimum-balance filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entrant {
    pub address: String,
    pub balance: u128,
}

impl Entrant {
    #[must_use]
    pub fn new(address: impl Into<String>, balance: u128) -> Self {
        Self { address: address.into(), balance }
    }
}

/// Decode owner and amount from raw token account data.
///
/// Returns `None` for data shorter than the base layout; Token-2022 accounts
/// with extensions keep the same leading offsets and decode normally.
#[must_use]
pub fn decode_account(data: &[u8]) -> Option<BalanceRecord> {
    if data.len() < ACCOUNT_MIN_LEN {
        return None;
    }
    Some(BalanceRecord {
        owner: encode_address(&data[ACCOUNT_OWNER]),
        amount: u64_from_le(&data[ACCOUNT_AMOUNT]),
    })
}

/// Sum balances per owner. Undecodable blobs and zero amounts are skipped.
#[must_use]
pub fn aggregate<I>(blobs: I) -> OwnerBalances
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut balances = OwnerBalances::new();
    let mut skipped = 0usize;
    for blob in blobs {
        let blob = blob.as_ref();
        let Some(rec) = decode_account(blob) else {
            trace!(len = blob.len(), "skipping short account blob");
            skipped += 1;
            continue;
        };
        if rec.amount == 0 {
            continue;
        }
        *balances.entry(rec.owner).or_insert(0) += u128::from(rec.amount);
    }
    debug!(owners = balances.len(), skipped, "aggregated holder balances");
    balances
}

/// Drop excluded owners and owners below `min_balance`, then sort by address.
///
/// Ordering is raw byte order of the address string. It fixes every ticket
/// range downstream, so it must never depend on locale or insertion order.
/// Zero balances are never eligible, whatever `min_balance` is.
#[must_use]
pub fn filter_eligible(
    balances: &OwnerBalances,
    excluded: &BTreeSet<String>,
    min_balance: u128,
) -> Vec<Entrant> {
    let mut entrants: Vec<Entrant> = balances
        .iter()
        .filter(|(addr, _)| !excluded.contains(*addr))
        .filter(|(_, bal)| **bal >= min_balance && **bal > 0)
        .map(|(addr, bal)| Entrant::new(addr.clone(), *bal))
        .collect();
    entrants.sort_by(|a, b| a.address.as_bytes().cmp(b.address.as_bytes()));
    debug!(
        holders = balances.len(),
        excluded = excluded.len(),
        eligible = entrants.len(),
        "eligibility filter applied"
    );
    entrants
}
