//! Time-related utilities with clock abstraction for testability.
//!
//! Every calendar date key and message timestamp in the system is produced
//! and parsed here, in the local time zone of the process.

use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::Duration,
};

use chrono::{DateTime, Local, NaiveDate, ParseError, Utc};

/// Format of ledger date keys (`2024-05-01`).
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Format of message timestamps (`2024-05-01 13:37:00`).
pub const MESSAGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_unix_millis()
    }
}

/// Manually driven clock for tests and simulations.
///
/// Starts at a fixed instant and only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a new manual clock at the given timestamp
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let delta = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.now.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_local(millis: i64) -> DateTime<Local> {
    DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&Local)
}

/// Calendar date of a Unix timestamp in the local time zone
pub fn local_date(millis: i64) -> NaiveDate {
    to_local(millis).date_naive()
}

/// Render a date as a ledger key
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a ledger key back into a date
pub fn parse_date_key(key: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
}

/// Convert Unix timestamp (milliseconds) to the message timestamp format
pub fn format_message_timestamp(millis: i64) -> String {
    to_local(millis)
        .format(MESSAGE_TIMESTAMP_FORMAT)
        .to_string()
}
