//! Wall-clock stamping shared by observation constructors.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current timestamp in milliseconds since the Unix epoch.
///
/// Used to stamp packets and memory snapshots at creation time, and by the
/// core to check packet timestamps against "now".
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
