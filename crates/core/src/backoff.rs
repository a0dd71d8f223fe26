//! Fixed callback delivery schedule.

use std::time::Duration;

/// Callback delivery schedule, in seconds. Contractual literal values.
///
/// The reporter makes one POST per schedule entry (10 attempts total) and
/// sleeps entry `n` after failed attempt `n`; after the final failure it
/// gives up without a terminal sleep.
pub const REPORT_BACKOFF_SECONDS: [u64; 10] = [1, 2, 4, 8, 16, 32, 64, 128, 256, 512];

/// The schedule as [`Duration`]s, ready to hand to the reporter.
pub fn report_backoff() -> Vec<Duration> {
    REPORT_BACKOFF_SECONDS
        .iter()
        .map(|s| Duration::from_secs(*s))
        .collect()
}
