//! SQLite-backed harvest manifest
//!
//! One run row per pipeline invocation, one image row per file that made it
//! to disk. Rows are written as downloads complete, so an interrupted run
//! leaves a manifest that accurately covers everything stored so far.

use crate::download::DownloadedImage;
use crate::storage::schema::initialize_schema;
use crate::storage::{RunRecord, RunStatus};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite manifest backend
pub struct HarvestManifest {
    conn: Connection,
}

impl HarvestManifest {
    /// Opens or creates the manifest database at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(HarvestManifest)` - Successfully opened/created database
    /// * `Err(rusqlite::Error)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory manifest (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Starts a new run and returns its id
    pub fn create_run(&mut self, config_hash: &str) -> Result<i64, rusqlite::Error> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, config_hash, status) VALUES (?1, ?2, ?3)",
            params![now, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Marks a run finished
    pub fn complete_run(&mut self, run_id: i64) -> Result<(), rusqlite::Error> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2 WHERE id = ?3",
            params![RunStatus::Completed.to_db_string(), now, run_id],
        )?;
        Ok(())
    }

    /// Fetches the most recent run, if any
    pub fn get_latest_run(&self) -> Result<Option<RunRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, started_at, finished_at, config_hash, status FROM runs ORDER BY id DESC LIMIT 1",
        )?;

        let run = stmt
            .query_row([], |row| {
                Ok(RunRecord {
                    id: row.get(0)?,
                    started_at: row.get(1)?,
                    finished_at: row.get(2)?,
                    config_hash: row.get(3)?,
                    status: RunStatus::from_db_string(&row.get::<_, String>(4)?)
                        .unwrap_or(RunStatus::Running),
                })
            })
            .optional()?;

        Ok(run)
    }

    /// Records provenance for one stored image
    pub fn record_image(
        &mut self,
        run_id: i64,
        image: &DownloadedImage,
    ) -> Result<(), rusqlite::Error> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO downloaded_images
             (run_id, manufacturer, file_path, alt_text, source, source_page, page_context, downloaded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                run_id,
                image.manufacturer,
                image.path.to_string_lossy(),
                image.alt_text,
                image.source.to_db_string(),
                image.source_page,
                image.page_context,
                now,
            ],
        )?;
        Ok(())
    }

    /// Counts images recorded for a run
    pub fn count_images(&self, run_id: i64) -> Result<u64, rusqlite::Error> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM downloaded_images WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Counts images recorded for a manufacturer across all runs
    pub fn count_images_for_manufacturer(
        &self,
        manufacturer: &str,
    ) -> Result<u64, rusqlite::Error> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM downloaded_images WHERE manufacturer = ?1",
            params![manufacturer],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
