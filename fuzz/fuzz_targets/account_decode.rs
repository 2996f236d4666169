#![no_main]

use libfuzzer_sys::fuzz_target;
use lottery_engine::{aggregate, decode_account};

fuzz_target!(|data: &[u8]| {
    let _ = decode_account(data);
    // Split input into several account blobs and aggregate them
    let balances = aggregate(data.chunks(97));
    assert!(balances.values().all(|&b| b > 0));
});
