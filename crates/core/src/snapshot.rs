//! Ordering rule for append-only snapshot histories.

use chrono::Duration;

use crate::types::Timestamp;

/// Smallest step, in microseconds, between two snapshots of the same parent.
///
/// Postgres `TIMESTAMPTZ` stores microseconds, so anything finer would collapse.
pub const MIN_SNAPSHOT_STEP_MICROS: i64 = 1;

/// Timestamp for a snapshot appended after `last`.
///
/// Returns `now` truncated to microseconds, bumped past `last` when the clock
/// has not advanced (or went backwards) since the previous append.
pub fn next_snapshot_time(last: Option<Timestamp>, now: Timestamp) -> Timestamp {
    let now = truncate_to_micros(now);
    match last {
        Some(prev) if now <= prev => prev + Duration::microseconds(MIN_SNAPSHOT_STEP_MICROS),
        _ => now,
    }
}

fn truncate_to_micros(ts: Timestamp) -> Timestamp {
    let excess = i64::from(ts.timestamp_subsec_nanos() % 1_000);
    ts - Duration::nanoseconds(excess)
}
