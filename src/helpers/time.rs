use chrono::Utc;
use tokio::time::Instant;

/// Milliseconds since the UNIX epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn get_instant() -> Instant {
    Instant::now()
}
