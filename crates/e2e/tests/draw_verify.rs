//! Snapshot → draw → audit file → verify, through the public crate surface.

use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use e2e::{account_blob, holder, scratch_dir};
use holder_lottery::audit_file::{read_audit, write_audit};
use holder_lottery::exclusions::parse_exclusions;
use holder_lottery::seed_feed::load_seed_from_feed_file;
use holder_lottery::{
    execute_draw, verify_audit, CliError, DrawError, DrawInputs, LotteryParams, MismatchField,
    VerifyError,
};

const SEED: &str = "GHtXQBsoZHVnNFa9YevAzFr17DJjgHXk3ycTKD5xD3Zi";

fn params() -> LotteryParams {
    LotteryParams {
        min_raw_balance: 1_000_000,
        excluded_wallets_file: None,
        ..LotteryParams::default()
    }
}

fn snapshot() -> Vec<Vec<u8>> {
    vec![
        account_blob(1, 40_000_000),
        account_blob(2, 15_000_000),
        account_blob(1, 10_000_000),
        account_blob(3, 999_999),
        account_blob(4, 0),
        account_blob(9, 500_000_000),
    ]
}

fn inputs(seed: &str, excluded: BTreeSet<String>) -> DrawInputs {
    DrawInputs {
        target_slot: 312_000_000,
        seed: seed.to_owned(),
        seed_source: "rpc:getBlock".into(),
        account_blobs: snapshot(),
        excluded,
    }
}

#[test]
fn persisted_audit_verifies() {
    let dir = scratch_dir("persisted");
    let path = dir.join("audit.json");
    let excluded = parse_exclusions(&format!("# treasury\n{}\n", holder(9)));

    let at = Utc.with_ymd_and_hms(2026, 5, 1, 20, 0, 0).single().expect("time");
    let res = execute_draw(&inputs(SEED, excluded), &params(), at).expect("draw");
    write_audit(&path, &res.record).expect("write");

    let record = read_audit(&path).expect("read");
    assert_eq!(record, res.record);
    assert_eq!(record.metadata.total_supply, 65_000_000);
    assert_eq!(record.all_entrants.len(), 2);
    assert!(record.all_entrants.iter().all(|e| e.address != holder(9)));

    let report = verify_audit(&record).expect("verifies");
    assert_eq!(report.winner, record.winner.address);
    assert_eq!(report.total_tickets, 65_000_000);
}

#[test]
fn tampering_on_disk_is_detected() {
    let dir = scratch_dir("tamper");
    let path = dir.join("audit.json");
    let res = execute_draw(&inputs(SEED, BTreeSet::new()), &params(), Utc::now()).expect("draw");
    write_audit(&path, &res.record).expect("write");

    let text = std::fs::read_to_string(&path).expect("read");
    let mut value: serde_json::Value = serde_json::from_str(&text).expect("json");
    value["all_entrants"][0]["balance"] = serde_json::json!(1);
    std::fs::write(&path, serde_json::to_string_pretty(&value).expect("encode")).expect("write");

    let record = read_audit(&path).expect("still parses");
    match verify_audit(&record) {
        Err(VerifyError::Mismatch { field, .. }) => assert_eq!(field, MismatchField::TotalTickets),
        other => panic!("expected total mismatch, got {other:?}"),
    }
}

#[test]
fn missing_field_is_a_read_error() {
    let dir = scratch_dir("missing");
    let path = dir.join("audit.json");
    let res = execute_draw(&inputs(SEED, BTreeSet::new()), &params(), Utc::now()).expect("draw");
    write_audit(&path, &res.record).expect("write");

    let text = std::fs::read_to_string(&path).expect("read");
    let mut value: serde_json::Value = serde_json::from_str(&text).expect("json");
    value["metadata"]
        .as_object_mut()
        .expect("object")
        .remove("seed_blockhash");
    std::fs::write(&path, value.to_string()).expect("write");

    assert!(matches!(read_audit(&path), Err(CliError::AuditCodec(_))));
}

#[test]
fn feed_file_seeds_the_draw() {
    let dir = scratch_dir("feed");
    let feed = dir.join("block.json");
    std::fs::write(&feed, format!(r#"{{"slot": 312000000, "blockhash": "{SEED}"}}"#)).expect("write");

    let seed = load_seed_from_feed_file(&feed, Some(312_000_000)).expect("seed");
    assert_eq!(seed, SEED);
    let a = execute_draw(&inputs(&seed, BTreeSet::new()), &params(), Utc::now()).expect("draw");
    let b = execute_draw(&inputs(SEED, BTreeSet::new()), &params(), Utc::now()).expect("draw");
    assert_eq!(a.outcome, b.outcome);

    assert!(load_seed_from_feed_file(&feed, Some(1)).is_err());
}

#[test]
fn everyone_excluded_writes_nothing() {
    let dir = scratch_dir("degenerate");
    let path = dir.join("audit.json");
    let excluded = [1u8, 2, 9].into_iter().map(holder).collect();

    let err = execute_draw(&inputs(SEED, excluded), &params(), Utc::now()).expect_err("no entrants");
    assert!(matches!(err, CliError::Draw(DrawError::NoEligibleEntrants)));
    assert!(!path.exists());
}
