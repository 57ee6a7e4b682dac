//! End-to-end harvest pipeline
//!
//! Wires the stages together: crawl every manufacturer domain, plan download
//! jobs from the harvests, fetch the images, and record provenance in the
//! manifest. Each stage runs to completion before the next starts, so
//! sequence numbers are settled before any download begins.

use crate::config::{Config, ManufacturerEntry};
use crate::crawler::{build_http_client, harvest_all};
use crate::download::{build_download_client, download_batch, plan_jobs, DownloadedImage};
use crate::storage::HarvestManifest;
use crate::HarvestError;
use std::path::Path;

/// Runs the full harvest for a manufacturer roster
///
/// Crawls domains, downloads every planned image, and writes one manifest
/// row per stored file. Individual domain and download failures are logged
/// and skipped; only setup failures (manifest, download directory, HTTP
/// clients) abort the run.
///
/// # Arguments
///
/// * `config` - The validated configuration
/// * `manufacturers` - The loaded roster with assigned ordinals
/// * `config_hash` - Hash of the raw config file, stamped on the run row
///
/// # Returns
///
/// Provenance records for every image that landed on disk
pub async fn run_harvest(
    config: &Config,
    manufacturers: &[ManufacturerEntry],
    config_hash: &str,
) -> Result<Vec<DownloadedImage>, HarvestError> {
    let download_dir = Path::new(&config.download.download_dir);
    std::fs::create_dir_all(download_dir)?;

    let mut manifest = HarvestManifest::new(Path::new(&config.download.manifest_path))?;
    let run_id = manifest.create_run(config_hash)?;
    tracing::info!("started run {} for {} manufacturers", run_id, manufacturers.len());

    let crawl_client = build_http_client(&config.crawl)?;
    let harvests = harvest_all(&crawl_client, &config.crawl, manufacturers).await;

    let jobs = plan_jobs(&harvests);
    tracing::info!("planned {} download jobs", jobs.len());

    let download_client = build_download_client()?;
    let downloaded = download_batch(
        &download_client,
        jobs,
        download_dir,
        config.download.max_concurrent_downloads as usize,
    )
    .await;

    for image in &downloaded {
        manifest.record_image(run_id, image)?;
    }
    manifest.complete_run(run_id)?;

    tracing::info!("run {} complete: {} images stored", run_id, downloaded.len());
    Ok(downloaded)
}
