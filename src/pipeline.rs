//! Draw orchestration: snapshot → eligibility → draw → audit record.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use lottery_engine::{aggregate, filter_eligible, run_draw, AuditContext, AuditRecord, DrawOutcome};
use tracing::info;

use crate::config::LotteryParams;
use crate::errors::CliError;
use crate::rpc::RpcClient;
use crate::seed_feed::load_seed_from_feed_file;

/// Everything a draw consumes, already fetched.
#[derive(Clone, Debug)]
pub struct DrawInputs {
    pub target_slot: u64,
    pub seed: String,
    pub seed_source: String,
    pub account_blobs: Vec<Vec<u8>>,
    pub excluded: BTreeSet<String>,
}

#[derive(Clone, Debug)]
pub struct DrawResult {
    pub record: AuditRecord,
    pub outcome: DrawOutcome,
    pub holders: usize,
}

/// Resolve the seed from a feed file when given, otherwise from the
/// finalized block at `slot`. Returns `(seed, source)`.
pub async fn resolve_seed(
    rpc: &RpcClient,
    feed_file: Option<&Path>,
    slot: u64,
) -> Result<(String, String), CliError> {
    let (seed, source) = if let Some(path) = feed_file {
        (load_seed_from_feed_file(path, Some(slot))?, format!("file:{}", path.display()))
    } else {
        (rpc.get_blockhash_for_slot(slot).await?, "rpc:getBlock".to_owned())
    };
    info!(%seed, %source, "resolved seed blockhash");
    Ok((seed, source))
}

/// Run the full draw over pre-fetched inputs. Pure apart from logging.
pub fn execute_draw(
    inputs: &DrawInputs,
    params: &LotteryParams,
    generated_at_utc: DateTime<Utc>,
) -> Result<DrawResult, CliError> {
    info!(accounts = inputs.account_blobs.len(), "accounts fetched");
    let balances = aggregate(&inputs.account_blobs);
    info!(owners = balances.len(), "unique owners");

    let entrants = filter_eligible(&balances, &inputs.excluded, params.min_raw_balance);
    let outcome = run_draw(&inputs.seed, &entrants)?;
    info!(
        entrants = outcome.ranges.len(),
        total_tickets = outcome.total_tickets,
        "eligible entrants"
    );

    let ctx = AuditContext {
        token_mint: params.mint.clone(),
        target_slot: inputs.target_slot,
        seed_source: inputs.seed_source.clone(),
        min_raw_balance: params.min_raw_balance,
        excluded_wallets_file: params
            .excluded_wallets_file
            .as_ref()
            .map(|p| p.display().to_string()),
        generated_at_utc,
    };
    let record = AuditRecord::from_outcome(&inputs.seed, &outcome, ctx);
    Ok(DrawResult { record, outcome, holders: balances.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottery_engine::{verify_audit, DrawError};
    use lottery_primitives::encode_address;

    fn account(owner: u8, amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; 165];
        data[32..64].fill(owner);
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data
    }

    fn inputs(blobs: Vec<Vec<u8>>, excluded: BTreeSet<String>) -> DrawInputs {
        DrawInputs {
            target_slot: 77,
            seed: "abc".into(),
            seed_source: "file:feed.txt".into(),
            account_blobs: blobs,
            excluded,
        }
    }

    #[test]
    fn draw_produces_verifiable_record() {
        let params = LotteryParams { min_raw_balance: 10, ..LotteryParams::default() };
        let blobs = vec![account(1, 100), account(2, 50), account(3, 200), account(4, 9)];
        let res = execute_draw(&inputs(blobs, BTreeSet::new()), &params, Utc::now()).expect("draw");

        assert_eq!(res.holders, 4);
        assert_eq!(res.record.all_entrants.len(), 3);
        assert_eq!(res.record.metadata.total_supply, 350);
        assert_eq!(res.record.metadata.target_slot, 77);
        assert_eq!(
            res.record.metadata.excluded_wallets_file.as_deref(),
            Some("excluded_wallets.mainnet.txt")
        );
        let report = verify_audit(&res.record).expect("verifies");
        assert_eq!(report.winner, res.outcome.winner().address);
    }

    #[test]
    fn below_minimum_is_never_a_winner() {
        let params = LotteryParams { min_raw_balance: 10, ..LotteryParams::default() };
        let small = encode_address(&[4u8; 32]);
        let blobs = vec![account(1, 10), account(4, 9)];
        let res = execute_draw(&inputs(blobs, BTreeSet::new()), &params, Utc::now()).expect("draw");
        assert!(res.record.all_entrants.iter().all(|e| e.address != small));
        assert_ne!(res.record.winner.address, small);
    }

    #[test]
    fn everyone_excluded_is_degenerate() {
        let params = LotteryParams { min_raw_balance: 1, ..LotteryParams::default() };
        let excluded: BTreeSet<String> = [encode_address(&[1u8; 32])].into_iter().collect();
        let err = execute_draw(&inputs(vec![account(1, 100)], excluded), &params, Utc::now())
            .expect_err("no entrants");
        assert!(matches!(err, CliError::Draw(DrawError::NoEligibleEntrants)));
    }
}
