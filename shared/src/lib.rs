use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit a duration was supplied in at the API boundary.
///
/// Durations are always stored in minutes; the unit is kept alongside the
/// entry for traceability of what the contributor originally typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Minutes,
    Hours,
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationUnit::Minutes => write!(f, "minutes"),
            DurationUnit::Hours => write!(f, "hours"),
        }
    }
}

/// A single prayer-time entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prayer {
    /// Backend-assigned identifier; absent for file-backed entries
    pub id: Option<i64>,
    /// Contributor name
    pub name: String,
    /// Duration in minutes (canonical unit)
    pub duration_minutes: i64,
    /// Unit the duration was originally supplied in
    pub unit: DurationUnit,
    /// Optional free-text annotation
    pub description: String,
    /// When the entry was logged (RFC 3339)
    pub recorded_at: String,
    /// Server-assigned row creation time; preferred backend only
    pub created_at: Option<String>,
    /// Which backend produced this entry ("preferred" | "fallback")
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddPrayerRequest {
    pub name: String,
    /// Duration magnitude, interpreted according to `unit`
    pub duration: i64,
    /// Defaults to minutes when omitted
    pub unit: Option<DurationUnit>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddPrayerResponse {
    pub prayer: Prayer,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerListResponse {
    pub prayers: Vec<Prayer>,
    pub count: usize,
}

/// Output of the statistics aggregator.
///
/// `progress_percentage` is not clamped at 100; displays that want a capped
/// value must clamp it themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerStatsResponse {
    pub total_entries: usize,
    pub total_minutes: i64,
    pub total_hours: f64,
    pub progress_percentage: f64,
    pub remaining_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePrayerRequest {
    pub name: Option<String>,
    /// New duration magnitude, interpreted according to `unit`
    pub duration: Option<i64>,
    pub unit: Option<DurationUnit>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePrayerResponse {
    pub prayer: Prayer,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePrayerResponse {
    pub deleted_id: i64,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub migrated_count: u32,
    pub skipped_count: u32,
    pub failed_count: u32,
    pub failures: Vec<String>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupResponse {
    pub file_path: String,
    pub entry_count: usize,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Which backend is serving requests ("preferred" | "fallback")
    pub active_backend: String,
    pub timestamp: String,
}

/// Body returned for every failed request, so that failures are never
/// shaped like successes with empty data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
