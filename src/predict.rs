//! Slot projection for announcing a future draw slot.

use chrono::{DateTime, Duration, NaiveTime, TimeZone};

use crate::errors::CliError;

/// Target slot time used for projection (heuristic, not consensus).
pub const SLOT_DURATION_MS: i64 = 400;

pub fn parse_hhmm(s: &str) -> Result<NaiveTime, CliError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| CliError::InvalidTime(s.to_owned()))
}

/// `at` today in `now`'s timezone, or tomorrow if that is already past.
#[must_use]
pub fn next_occurrence<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> Option<DateTime<Tz>> {
    let local = now.date_naive().and_time(at);
    let target = now.timezone().from_local_datetime(&local).earliest()?;
    if target < *now {
        return Some(target + Duration::days(1));
    }
    Some(target)
}

/// `current_slot + (target - block_time) / SLOT_DURATION`, truncated toward zero.
#[must_use]
pub fn project_slot(current_slot: u64, current_block_time: i64, target_unix: i64) -> u64 {
    let delta_ms = (i128::from(target_unix) - i128::from(current_block_time)) * 1_000;
    let slots = delta_ms / i128::from(SLOT_DURATION_MS);
    let projected = i128::from(current_slot) + slots;
    u64::try_from(projected.max(0)).unwrap_or(u64::MAX)
}
