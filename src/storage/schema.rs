//! Database schema definitions
//!
//! This module contains the SQL schema for the harvest manifest database.

/// SQL schema for the manifest database
pub const SCHEMA_SQL: &str = r#"
-- Track harvest runs
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL
);

-- Provenance for every image that landed on disk
CREATE TABLE IF NOT EXISTS downloaded_images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    manufacturer TEXT NOT NULL,
    file_path TEXT NOT NULL,
    alt_text TEXT NOT NULL,
    source TEXT NOT NULL,
    source_page TEXT NOT NULL,
    page_context TEXT NOT NULL,
    downloaded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_images_run ON downloaded_images(run_id);
CREATE INDEX IF NOT EXISTS idx_images_manufacturer ON downloaded_images(manufacturer);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
