//! Crawler module for page fetching and image harvesting
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing: image references, same-site links, menu links, page text
//! - Depth-first per-domain traversal with robots and politeness gates
//! - Per-manufacturer fan-out under a global concurrency ceiling

mod extractor;
mod fetcher;
mod orchestrator;
mod walker;

pub use extractor::{extract_content, ExtractedContent};
pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use orchestrator::harvest_all;
pub use walker::DomainCrawler;
