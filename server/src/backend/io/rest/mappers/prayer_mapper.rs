//! Conversions between domain prayer types and the shared DTOs.

use crate::backend::domain::models::prayer::{DurationUnit, PrayerEntry};
use crate::backend::domain::stats::PrayerStats;

pub struct PrayerMapper;

impl PrayerMapper {
    pub fn to_dto(entry: PrayerEntry) -> shared::Prayer {
        shared::Prayer {
            id: entry.id,
            name: entry.name,
            duration_minutes: entry.duration_minutes,
            unit: Self::unit_to_dto(entry.unit),
            description: entry.description,
            recorded_at: entry.recorded_at.to_rfc3339(),
            created_at: entry.created_at.map(|t| t.to_rfc3339()),
            source: entry.source.to_string(),
        }
    }

    pub fn unit_to_domain(unit: shared::DurationUnit) -> DurationUnit {
        match unit {
            shared::DurationUnit::Minutes => DurationUnit::Minutes,
            shared::DurationUnit::Hours => DurationUnit::Hours,
        }
    }

    pub fn unit_to_dto(unit: DurationUnit) -> shared::DurationUnit {
        match unit {
            DurationUnit::Minutes => shared::DurationUnit::Minutes,
            DurationUnit::Hours => shared::DurationUnit::Hours,
        }
    }

    pub fn stats_to_dto(stats: PrayerStats) -> shared::PrayerStatsResponse {
        shared::PrayerStatsResponse {
            total_entries: stats.total_entries,
            total_minutes: stats.total_minutes,
            total_hours: stats.total_hours,
            progress_percentage: stats.progress_percentage,
            remaining_hours: stats.remaining_hours,
        }
    }
}
