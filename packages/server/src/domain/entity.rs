//! Entities and the in-memory documents built from them.

use std::collections::BTreeMap;

use staffwatch_shared::time::format_message_timestamp;

use super::value_object::{DateKey, StaffId, Timestamp};

/// One chat line written by a staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMessage {
    /// Message body as typed
    pub text: String,
    /// Creation time in `YYYY-MM-DD HH:MM:SS` (local time)
    pub timestamp: String,
}

impl StaffMessage {
    /// Create a message stamped with `sent_at`
    pub fn new(text: String, sent_at: Timestamp) -> Self {
        Self {
            text,
            timestamp: format_message_timestamp(sent_at.value()),
        }
    }

    /// Rebuild a message from persisted parts
    pub fn from_parts(text: String, timestamp: String) -> Self {
        Self { text, timestamp }
    }
}

/// Opaque metadata kept per roster entry.
///
/// Nothing reads it yet; whatever JSON was loaded is written back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffProfile(serde_json::Value);

impl StaffProfile {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl Default for StaffProfile {
    fn default() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }
}

/// An open presence interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSession {
    pub staff: StaffId,
    pub started_at: Timestamp,
}

impl OpenSession {
    pub fn new(staff: StaffId, started_at: Timestamp) -> Self {
        Self { staff, started_at }
    }
}

/// staff → chronological messages
pub type MessageLog = BTreeMap<StaffId, Vec<StaffMessage>>;

/// day → accumulated minutes, for a single staff member
pub type DailyPlaytime = BTreeMap<DateKey, u64>;

/// staff → day → accumulated minutes
pub type PlaytimeLedger = BTreeMap<StaffId, DailyPlaytime>;

/// every staff member ever seen
pub type Roster = BTreeMap<StaffId, StaffProfile>;
