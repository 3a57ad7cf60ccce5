use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::storage::StoreResult;

/// JsonConnection manages the data directory holding the fallback document
/// and backup snapshots.
#[derive(Clone)]
pub struct JsonConnection {
    data_dir: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at the given directory, creating it if
    /// needed.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
        }

        Ok(Self { data_dir })
    }

    /// Path of the single document holding all fallback entries.
    pub fn data_file_path(&self) -> PathBuf {
        self.data_dir.join("prayers.json")
    }

    /// Path for a new backup snapshot, named with the supplied timestamp so
    /// successive backups never collide.
    pub fn backup_file_path(&self, stamp: &str) -> PathBuf {
        self.data_dir.join(format!("backup_prayers_{stamp}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("deeper").join("data");

        let connection = JsonConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.data_file_path(), nested.join("prayers.json"));
    }

    #[test]
    fn test_backup_path_embeds_stamp() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        let path = connection.backup_file_path("20250310_083015");
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "backup_prayers_20250310_083015.json"
        );
    }
}
