//! Seed (blockhash) extraction from a static block feed file.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::{CliError, SeedFeedError};

/// Read `path` and extract the blockhash, cross-checking `slot_hint` where
/// the feed records a slot.
pub fn load_seed_from_feed_file(path: &Path, slot_hint: Option<u64>) -> Result<String, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    Ok(parse_seed_feed(&raw, slot_hint)?)
}

/// Accepted shapes, tried in order:
///
/// 1. raw blockhash string (anything not starting with `{`)
/// 2. `{"blockhash": ...}`, optionally with `"slot"`
/// 3. `{"result": {"blockhash": ...}}`
/// 4. `{"blocks": {"<slot>": {"blockhash": ...}}}` (needs `slot_hint`)
pub fn parse_seed_feed(raw: &str, slot_hint: Option<u64>) -> Result<String, SeedFeedError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SeedFeedError::Empty);
    }
    if !raw.starts_with('{') {
        warn!("seed feed is a raw string; it carries no slot to cross-check");
        return Ok(raw.to_owned());
    }

    let doc: Value = serde_json::from_str(raw).map_err(|e| SeedFeedError::NotJson(e.to_string()))?;
    let Some(obj) = doc.as_object() else {
        return Err(SeedFeedError::NoBlockhash);
    };

    if let Some(hash) = blockhash_of(obj) {
        match (slot_hint, obj.get("slot")) {
            (Some(expected), Some(slot)) => {
                let file_slot = slot_number(slot)?;
                if file_slot != expected {
                    return Err(SeedFeedError::SlotMismatch { file_slot, expected });
                }
            }
            (_, None) => warn!("seed feed has no slot; blockhash is not slot-bound"),
            (None, Some(_)) => {}
        }
        return Ok(hash);
    }

    if let Some(hash) = obj
        .get("result")
        .and_then(Value::as_object)
        .and_then(blockhash_of)
    {
        warn!("seed feed is a getBlock result; it carries no slot to cross-check");
        return Ok(hash);
    }

    if let (Some(slot), Some(blocks)) = (slot_hint, obj.get("blocks").and_then(Value::as_object)) {
        if let Some(hash) = blocks
            .get(&slot.to_string())
            .and_then(Value::as_object)
            .and_then(blockhash_of)
        {
            return Ok(hash);
        }
    }

    Err(SeedFeedError::NoBlockhash)
}

fn blockhash_of(obj: &Map<String, Value>) -> Option<String> {
    obj.get("blockhash")
        .and_then(Value::as_str)
        .filter(|h| !h.is_empty())
        .map(str::to_owned)
}

fn slot_number(v: &Value) -> Result<u64, SeedFeedError> {
    v.as_u64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| SeedFeedError::InvalidSlot(v.to_string()))
}
