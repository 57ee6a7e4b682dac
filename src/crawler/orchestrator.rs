//! Crawl orchestrator
//!
//! Fans out one domain crawl per manufacturer under a global concurrency
//! ceiling. Domains that were abandoned (no robots policy, dead seed page)
//! are dropped from the aggregate; they are visible only in the logs.

use crate::config::{CrawlConfig, ManufacturerEntry};
use crate::crawler::walker::DomainCrawler;
use crate::state::DomainHarvest;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Crawls every manufacturer domain, bounded by `max-concurrent-domains`
///
/// Each manufacturer gets its own task and its own single-owner crawl
/// state; the only shared pieces are the HTTP client (connection reuse) and
/// the semaphore. Results arrive unordered; per-manufacturer sequence
/// numbers are assigned later, at job-planning time.
///
/// # Arguments
///
/// * `client` - The shared crawl HTTP client
/// * `config` - The crawl configuration
/// * `manufacturers` - The loaded roster
///
/// # Returns
///
/// Harvests for every domain that produced a fetchable seed page
pub async fn harvest_all(
    client: &Client,
    config: &CrawlConfig,
    manufacturers: &[ManufacturerEntry],
) -> Vec<DomainHarvest> {
    let semaphore = Arc::new(Semaphore::new(config.max_concurrent_domains as usize));
    let mut handles = Vec::with_capacity(manufacturers.len());

    for entry in manufacturers.iter().cloned() {
        let client = client.clone();
        let config = config.clone();
        let semaphore = Arc::clone(&semaphore);

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            DomainCrawler::new(client, config).crawl(&entry).await
        }));
    }

    let mut harvests = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(Some(harvest)) => harvests.push(harvest),
            Ok(None) => {}
            Err(e) => tracing::error!("domain crawl task failed: {}", e),
        }
    }

    tracing::info!(
        "harvested {} of {} domains",
        harvests.len(),
        manufacturers.len()
    );

    harvests
}
