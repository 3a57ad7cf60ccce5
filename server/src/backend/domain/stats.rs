//! Statistics over the current set of prayer entries.

use serde::Serialize;

use super::models::prayer::PrayerEntry;

/// The fixed campaign goal, in hours.
pub const GOAL_HOURS: f64 = 1000.0;

/// Derived statistics for a set of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerStats {
    pub total_entries: usize,
    pub total_minutes: i64,
    pub total_hours: f64,
    /// Progress toward the goal, in percent. Deliberately not clamped at
    /// 100; callers that want a capped display value clamp themselves.
    pub progress_percentage: f64,
    /// Hours still missing to reach the goal, floored at zero.
    pub remaining_hours: f64,
}

/// Compute statistics for the given entries.
///
/// Pure function: same input list, same output, no I/O. Fractional values
/// are rounded to 2 decimal places, half away from zero.
pub fn compute_stats(entries: &[PrayerEntry]) -> PrayerStats {
    let total_minutes: i64 = entries.iter().map(|e| e.duration_minutes).sum();
    let total_hours = total_minutes as f64 / 60.0;
    let progress_percentage = (total_hours / GOAL_HOURS) * 100.0;
    let remaining_hours = (GOAL_HOURS - total_hours).max(0.0);

    PrayerStats {
        total_entries: entries.len(),
        total_minutes,
        total_hours: round2(total_hours),
        progress_percentage: round2(progress_percentage),
        remaining_hours: round2(remaining_hours),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
