//! Replay-window check on the sender's timestamp.

use std::time::{SystemTime, UNIX_EPOCH};

/// Default tolerated skew between sender and verifier clocks.
pub const DEFAULT_LENIENCY_SECS: f64 = 300.0;

/// Returns true when `sent_at` lies strictly within `leniency_secs` of
/// `received_at_secs`, in either direction.
///
/// An absent, non-numeric or non-finite timestamp is never fresh.
pub fn is_fresh(sent_at: Option<&str>, received_at_secs: f64, leniency_secs: f64) -> bool {
    let Some(sent_at) = sent_at.and_then(parse_seconds) else {
        return false;
    };

    (sent_at - received_at_secs).abs() < leniency_secs
}

/// Wall-clock time in fractional seconds since the epoch.
pub fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

fn parse_seconds(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|secs| secs.is_finite())
}
