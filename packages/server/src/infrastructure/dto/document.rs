//! JSON document shapes.
//!
//! `messages.json` and `/staffs/messages` share [`MessagesDocument`];
//! `playtime.json` and `/staffs/playtime` share [`PlaytimeDocument`];
//! `staffs.json` is a [`RosterDocument`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single chat line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub message: String,
    pub timestamp: String,
}

/// staffId → messages
pub type MessagesDocument = BTreeMap<String, Vec<MessageRecord>>;

/// staffId → `YYYY-MM-DD` → minutes
pub type PlaytimeDocument = BTreeMap<String, BTreeMap<String, u64>>;

/// staffId → opaque metadata
pub type RosterDocument = BTreeMap<String, serde_json::Value>;
