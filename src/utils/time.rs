use chrono::{Local, Utc};

/// Unix timestamp in seconds, used for session expiry bookkeeping.
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Display clock time (hour:minute) for chat message stamps.
pub fn clock_time() -> String {
    Local::now().format("%H:%M").to_string()
}
