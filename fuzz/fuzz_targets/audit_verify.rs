#![no_main]

use libfuzzer_sys::fuzz_target;
use lottery_engine::{verify_audit, AuditRecord};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(record) = AuditRecord::from_json(text) {
        // Must never panic on untrusted records
        let _ = verify_audit(&record);
    }
});
