//! Domain logic for session accounting and staff statistics.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use super::{
    entity::DailyPlaytime,
    value_object::{StaffId, Timestamp},
};

const MILLIS_PER_MINUTE: i64 = 60 * 1000;

/// Whole minutes elapsed between two instants, rounded down.
///
/// An end before the start (clock moved backwards) counts as zero.
pub fn elapsed_minutes(started_at: Timestamp, ended_at: Timestamp) -> u64 {
    let elapsed = ended_at.value().saturating_sub(started_at.value());
    u64::try_from(elapsed / MILLIS_PER_MINUTE).unwrap_or(0)
}

/// Aggregates over one staff member's ledger entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaytimeSummary {
    /// Number of distinct days with an entry
    pub active_days: usize,
    /// Sum of minutes over those days
    pub total_minutes: u64,
    /// `total_minutes / active_days`, or 0 when there are no days
    pub average_minutes: f64,
}

/// Summarize a staff member's daily playtime.
///
/// # Arguments
///
/// * `daily` - The staff member's ledger entry, `None` if they have none
pub fn summarize_playtime(daily: Option<&DailyPlaytime>) -> PlaytimeSummary {
    let Some(daily) = daily else {
        return PlaytimeSummary {
            active_days: 0,
            total_minutes: 0,
            average_minutes: 0.0,
        };
    };

    let active_days = daily.len();
    let total_minutes: u64 = daily.values().sum();
    let average_minutes = if active_days == 0 {
        0.0
    } else {
        total_minutes as f64 / active_days as f64
    };

    PlaytimeSummary {
        active_days,
        total_minutes,
        average_minutes,
    }
}

/// Per-staff statistics record.
///
/// `total_connections` and `active_days` are the same quantity (number of
/// days in the ledger); both names are part of the public payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffStats {
    pub staff: StaffId,
    pub online: bool,
    pub total_connections: usize,
    pub average_time: f64,
    pub active_days: usize,
}

impl StaffStats {
    /// Project a statistics record from a ledger entry and the online flag
    pub fn project(staff: StaffId, online: bool, daily: Option<&DailyPlaytime>) -> Self {
        let summary = summarize_playtime(daily);
        Self {
            staff,
            online,
            total_connections: summary.active_days,
            average_time: summary.average_minutes,
            active_days: summary.active_days,
        }
    }
}
