//! Configuration module
//!
//! Handles loading, parsing, and validation of the TOML configuration file
//! and the manufacturer roster.

mod manufacturers;
mod parser;
mod types;
mod validation;

pub use manufacturers::{load_manufacturers, ManufacturerEntry};
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlConfig, DownloadConfig};
pub use validation::validate;
