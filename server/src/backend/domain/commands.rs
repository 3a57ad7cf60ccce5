//! Command types consumed by the domain services.

pub mod prayers {
    use crate::backend::domain::models::prayer::DurationUnit;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone)]
    pub struct AddPrayerCommand {
        pub name: String,
        /// Duration magnitude in `unit`
        pub duration: i64,
        /// Defaults to minutes when absent
        pub unit: Option<DurationUnit>,
        pub description: Option<String>,
        /// Logged time; the service assigns the current time when absent
        pub recorded_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdatePrayerCommand {
        pub name: Option<String>,
        /// New duration magnitude in `unit`
        pub duration: Option<i64>,
        pub unit: Option<DurationUnit>,
        pub description: Option<String>,
    }
}
