//! Environment configuration, read once at startup.

use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Connection settings for the preferred Postgres backend. Both values are
/// required; a partial pair counts as "not configured".
#[derive(Debug, Clone)]
pub struct PreferredBackendConfig {
    /// Connection URL (`postgres://user@host:port/db`)
    pub url: String,
    /// Credential applied to the connection
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port the REST listener binds to
    pub port: u16,
    /// Directory holding the fallback document and backup snapshots
    pub data_dir: PathBuf,
    /// Preferred backend settings; `None` selects the fallback file store
    /// without ever attempting a connection
    pub preferred: Option<PreferredBackendConfig>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `PRAYER_DB_URL` and `PRAYER_DB_KEY` select and authenticate the
    /// preferred backend; `PRAYER_DATA_DIR` (default `data`) locates the
    /// fallback file; `PORT` (default 3000) binds the listener.
    pub fn from_env() -> Self {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("invalid PORT value '{raw}': {e}, using default 3000");
                3000
            }),
            Err(_) => 3000,
        };

        let data_dir = env::var("PRAYER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let preferred =
            preferred_from(env::var("PRAYER_DB_URL").ok(), env::var("PRAYER_DB_KEY").ok());
        if preferred.is_none() {
            info!("PRAYER_DB_URL/PRAYER_DB_KEY not set, preferred backend disabled");
        }

        Self {
            port,
            data_dir,
            preferred,
        }
    }
}

/// Combine the two preferred-backend settings; both must be present and
/// non-empty for the backend to count as configured.
fn preferred_from(url: Option<String>, key: Option<String>) -> Option<PreferredBackendConfig> {
    match (url, key) {
        (Some(url), Some(key)) if !url.trim().is_empty() && !key.trim().is_empty() => {
            Some(PreferredBackendConfig { url, key })
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("only one of PRAYER_DB_URL/PRAYER_DB_KEY is set, preferred backend disabled");
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_settings_present_configure_the_preferred_backend() {
        let preferred = preferred_from(
            Some("postgres://prayers@db.example.com/prayers".to_string()),
            Some("secret".to_string()),
        );
        assert!(preferred.is_some());
    }

    #[test]
    fn test_partial_or_empty_settings_disable_the_preferred_backend() {
        assert!(preferred_from(Some("postgres://x".to_string()), None).is_none());
        assert!(preferred_from(None, Some("secret".to_string())).is_none());
        assert!(preferred_from(Some("  ".to_string()), Some("secret".to_string())).is_none());
        assert!(preferred_from(None, None).is_none());
    }
}
