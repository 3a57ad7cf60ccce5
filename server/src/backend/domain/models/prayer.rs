//! Domain model for prayer-time entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit a duration was supplied in at the boundary.
///
/// The canonical storage unit is always minutes; the source unit is carried
/// on the entry for traceability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    #[default]
    Minutes,
    Hours,
}

impl DurationUnit {
    /// Normalize a duration magnitude in this unit to minutes.
    ///
    /// Returns `None` when the conversion would overflow.
    pub fn to_minutes(self, value: i64) -> Option<i64> {
        match self {
            DurationUnit::Minutes => Some(value),
            DurationUnit::Hours => value.checked_mul(60),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DurationUnit::Minutes => "minutes",
            DurationUnit::Hours => "hours",
        }
    }

    /// Parse a stored unit tag, defaulting to minutes for anything
    /// unrecognized (legacy rows carry free-text units).
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "hours" => DurationUnit::Hours,
            _ => DurationUnit::Minutes,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which backend produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Preferred,
    Fallback,
}

impl EntrySource {
    pub fn as_str(self) -> &'static str {
        match self {
            EntrySource::Preferred => "preferred",
            EntrySource::Fallback => "fallback",
        }
    }
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted prayer-time entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerEntry {
    /// Backend-assigned identifier; `None` for file-backed entries, which
    /// have no stable identifier scheme
    pub id: Option<i64>,
    pub name: String,
    /// Always non-negative; canonical unit is minutes
    pub duration_minutes: i64,
    /// Source unit the duration was supplied in, pre-normalization
    pub unit: DurationUnit,
    pub description: String,
    /// When the entry was logged
    pub recorded_at: DateTime<Utc>,
    /// Server-assigned row creation time; preferred backend only
    pub created_at: Option<DateTime<Utc>>,
    pub source: EntrySource,
}

impl PrayerEntry {
    /// Duplicate-detection signature used when merging fallback data into
    /// the preferred store: name, canonical minutes, and the recorded
    /// timestamp truncated to the second.
    pub fn signature(&self) -> String {
        format!(
            "{}_{}_{}",
            self.name,
            self.duration_minutes,
            self.recorded_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// A validated, normalized entry ready to be persisted.
///
/// `recorded_at` is assigned by the domain service before dispatch so the
/// preferred write and its fallback mirror share one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrayerEntry {
    pub name: String,
    pub duration_minutes: i64,
    pub unit: DurationUnit,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}

/// Field-wise update applied to an existing entry; `None` leaves the stored
/// value untouched. Duration is already normalized to minutes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrayerPatch {
    pub name: Option<String>,
    pub duration_minutes: Option<i64>,
    pub unit: Option<DurationUnit>,
    pub description: Option<String>,
}

impl PrayerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.duration_minutes.is_none()
            && self.unit.is_none()
            && self.description.is_none()
    }
}
