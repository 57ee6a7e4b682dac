//! Storage module for the harvest manifest
//!
//! This module handles all database operations for the pipeline, including:
//! - SQLite database initialization and schema management
//! - Run tracking
//! - Provenance records for downloaded images

mod schema;
mod sqlite;

pub use schema::initialize_schema;
pub use sqlite::HarvestManifest;

use std::path::Path;

/// Opens or creates a manifest database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(HarvestManifest)` - Successfully initialized manifest
/// * `Err(rusqlite::Error)` - Failed to initialize manifest
pub fn open_manifest(path: &Path) -> Result<HarvestManifest, rusqlite::Error> {
    HarvestManifest::new(path)
}

/// Represents a harvest run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
}

/// Status of a harvest run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_roundtrip() {
        for status in &[RunStatus::Running, RunStatus::Completed, RunStatus::Failed] {
            let db_str = status.to_db_string();
            assert_eq!(Some(*status), RunStatus::from_db_string(db_str));
        }
    }

    #[test]
    fn test_run_status_invalid() {
        assert_eq!(RunStatus::from_db_string("paused"), None);
    }
}
