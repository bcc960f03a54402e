//! Value objects
//!
//! 識別子・時刻・日付キーをプリミティブ型のまま扱わず、生成時に検証する。

use std::fmt;

use chrono::NaiveDate;
use staffwatch_shared::time::{format_date_key, local_date, parse_date_key};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Staff identifier (the host's player name)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StaffId(String);

impl StaffId {
    /// 新しい StaffId を作成（空文字列は不可）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyStaffId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for StaffId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for StaffId {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one concurrent presence (the host's connection id)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// 新しい SessionId を作成（空文字列は不可）
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptySessionId);
        }
        Ok(Self(value))
    }

    /// ランダムな SessionId を生成（UUID v4）
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Calendar day bucket of the playtime ledger, in local time.
///
/// Rendered as `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Local calendar day containing `timestamp`
    pub fn from_timestamp(timestamp: Timestamp) -> Self {
        Self(local_date(timestamp.value()))
    }

    /// Parse a `YYYY-MM-DD` key
    ///
    /// Only the canonical zero-padded form is accepted, so every day has exactly
    /// one spelling (`2024-5-1` is rejected).
    pub fn parse(key: &str) -> Result<Self, ValueObjectError> {
        match parse_date_key(key) {
            Ok(date) if format_date_key(date) == key => Ok(Self(date)),
            _ => Err(ValueObjectError::InvalidDateKey(key.to_string())),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_date_key(self.0))
    }
}
