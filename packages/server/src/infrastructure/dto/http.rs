//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Element of the `/staffs` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffStatsDto {
    pub name: String,
    pub online: bool,
    pub total_connections: usize,
    pub average_time: f64,
    pub active_days: usize,
}
