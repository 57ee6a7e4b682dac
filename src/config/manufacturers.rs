//! Manufacturer roster loading
//!
//! The roster is a TOML file with one `[[manufacturer]]` table per entry.
//! Ordinals are assigned from file order at load time and stay stable for
//! the lifetime of the run; the image namer derives its 3-letter code from
//! them, so reordering the roster between runs changes generated names.

use crate::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// A manufacturer as written in the roster file
#[derive(Debug, Clone, Deserialize)]
struct ManufacturerRecord {
    /// Display name; also used as the per-manufacturer storage directory
    name: String,

    /// Raw website string; canonicalized by the crawler (scheme may be absent)
    website: String,

    /// Product terms associated with this manufacturer
    #[serde(default)]
    products: Vec<String>,

    /// Process capability terms
    #[serde(default, rename = "process-capabilities")]
    process_capabilities: Vec<String>,

    /// Industry terms
    #[serde(default)]
    industries: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    manufacturer: Vec<ManufacturerRecord>,
}

/// A manufacturer entry with its load-time ordinal
///
/// Immutable once loaded; owned by the orchestrator for the run's lifetime.
#[derive(Debug, Clone)]
pub struct ManufacturerEntry {
    pub name: String,
    /// 0-based position in the roster file
    pub ordinal: usize,
    pub website: String,
    pub products: Vec<String>,
    pub process_capabilities: Vec<String>,
    pub industries: Vec<String>,
}

/// Loads the manufacturer roster, assigning 0-based ordinals in file order
///
/// # Arguments
///
/// * `path` - Path to the TOML roster file
///
/// # Returns
///
/// * `Ok(Vec<ManufacturerEntry>)` - Entries in roster order
/// * `Err(ConfigError)` - Failed to read or parse, or an entry is invalid
pub fn load_manufacturers(path: &Path) -> Result<Vec<ManufacturerEntry>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let roster: RosterFile = toml::from_str(&content)?;

    let mut entries = Vec::with_capacity(roster.manufacturer.len());
    for (ordinal, record) in roster.manufacturer.into_iter().enumerate() {
        if record.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "manufacturer at position {} has an empty name",
                ordinal
            )));
        }
        if record.website.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "manufacturer '{}' has an empty website",
                record.name
            )));
        }

        entries.push(ManufacturerEntry {
            name: record.name,
            ordinal,
            website: record.website,
            products: record.products,
            process_capabilities: record.process_capabilities,
            industries: record.industries,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_roster(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_roster_assigns_ordinals_in_file_order() {
        let file = create_temp_roster(
            r#"
[[manufacturer]]
name = "Acme Machining"
website = "acme-machining.example"
products = ["brackets", "housings"]
process-capabilities = ["cnc milling"]
industries = ["aerospace"]

[[manufacturer]]
name = "Borealis Castings"
website = "https://borealis.example"
"#,
        );

        let entries = load_manufacturers(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].ordinal, 0);
        assert_eq!(entries[0].name, "Acme Machining");
        assert_eq!(entries[0].products, vec!["brackets", "housings"]);
        assert_eq!(entries[1].ordinal, 1);
        assert_eq!(entries[1].website, "https://borealis.example");
        assert!(entries[1].products.is_empty());
    }

    #[test]
    fn test_empty_roster_is_ok() {
        let file = create_temp_roster("");
        let entries = load_manufacturers(file.path()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let file = create_temp_roster(
            r#"
[[manufacturer]]
name = ""
website = "example.com"
"#,
        );
        let result = load_manufacturers(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_website_rejected() {
        let file = create_temp_roster(
            r#"
[[manufacturer]]
name = "Acme"
website = " "
"#,
        );
        let result = load_manufacturers(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
