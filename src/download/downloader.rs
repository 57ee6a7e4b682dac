//! Batch image downloader
//!
//! Runs download jobs as concurrent tasks over one shared connection pool,
//! writes bytes under the generated names into per-manufacturer
//! directories, and reports provenance for every image that landed on disk.
//! A failed job produces no record and no visible file; partial writes stay
//! behind a `.part` suffix until the rename that makes them visible.

use crate::download::jobs::DownloadJob;
use crate::download::namer::image_name;
use crate::state::ImageSource;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Extensions stored as-is; anything else becomes `.jpg`
const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];

/// Fallback extension for unknown or missing ones
const DEFAULT_EXTENSION: &str = ".jpg";

/// A successfully stored image with its provenance
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    /// Manufacturer display name
    pub manufacturer: String,

    /// Final on-disk path
    pub path: PathBuf,

    /// Alt text carried over from extraction
    pub alt_text: String,

    /// Source classification carried over from extraction
    pub source: ImageSource,

    /// URL of the page the image was found on
    pub source_page: String,

    /// Flattened text of the source page
    pub page_context: String,
}

/// Builds the HTTP client used for image downloads
///
/// Certificate verification is deliberately disabled: a notable share of
/// manufacturer sites serve images through hosts with broken or expired
/// certificate chains, and the downloaded bytes are classifier input, not
/// trusted content. This client must never be used for anything but image
/// GETs.
pub fn build_download_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Downloads all jobs concurrently, bounded by `max_concurrent`
///
/// Jobs fail independently: a non-200 response, transport error, or write
/// error drops that job with a log line and touches nothing else. Results
/// arrive unordered.
///
/// # Arguments
///
/// * `client` - The download HTTP client
/// * `jobs` - Planned download jobs (sequence numbers already assigned)
/// * `download_dir` - Root directory for per-manufacturer folders
/// * `max_concurrent` - Concurrent download ceiling
pub async fn download_batch(
    client: &Client,
    jobs: Vec<DownloadJob>,
    download_dir: &Path,
    max_concurrent: usize,
) -> Vec<DownloadedImage> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut handles = Vec::with_capacity(jobs.len());

    for job in jobs {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let download_dir = download_dir.to_path_buf();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            download_single(&client, &job, &download_dir).await
        }));
    }

    let mut downloaded = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(Some(record)) => downloaded.push(record),
            Ok(None) => {}
            Err(e) => tracing::error!("download task failed: {}", e),
        }
    }

    tracing::info!("stored {} images", downloaded.len());
    downloaded
}

/// Downloads one image and writes it under its generated name
///
/// Returns None on any failure; the job is simply dropped from the result
/// set.
async fn download_single(
    client: &Client,
    job: &DownloadJob,
    download_dir: &Path,
) -> Option<DownloadedImage> {
    let response = match client.get(&job.image.url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("download failed for {}: {}", job.image.url, e);
            return None;
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("download of {} got HTTP {}", job.image.url, status.as_u16());
        return None;
    }

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("reading body of {} failed: {}", job.image.url, e);
            return None;
        }
    };

    let manufacturer_dir = download_dir.join(sanitize_component(&job.manufacturer));
    if let Err(e) = tokio::fs::create_dir_all(&manufacturer_dir).await {
        tracing::error!("cannot create {}: {}", manufacturer_dir.display(), e);
        return None;
    }

    let file_name = format!(
        "{}{}",
        image_name(job.ordinal, job.sequence),
        infer_extension(&job.image.url)
    );
    let final_path = manufacturer_dir.join(&file_name);
    let part_path = manufacturer_dir.join(format!("{}.part", file_name));

    // Write-then-rename: an interrupted write never leaves a corrupt file
    // visible under the final name.
    if let Err(e) = tokio::fs::write(&part_path, &bytes).await {
        tracing::warn!("write failed for {}: {}", part_path.display(), e);
        let _ = tokio::fs::remove_file(&part_path).await;
        return None;
    }
    if let Err(e) = tokio::fs::rename(&part_path, &final_path).await {
        tracing::warn!("rename failed for {}: {}", final_path.display(), e);
        let _ = tokio::fs::remove_file(&part_path).await;
        return None;
    }

    tracing::debug!("stored {} as {}", job.image.url, final_path.display());

    Some(DownloadedImage {
        manufacturer: job.manufacturer.clone(),
        path: final_path,
        alt_text: job.image.alt_text.clone(),
        source: job.image.source,
        source_page: job.image.source_page.clone(),
        page_context: job.image.page_context.clone(),
    })
}

/// Infers a storage extension from the image URL's path
///
/// Query strings and fragments are ignored. Extensions outside the allowed
/// set, and paths without one, fall back to `.jpg`.
pub fn infer_extension(image_url: &str) -> &'static str {
    let path = match Url::parse(image_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => image_url.to_string(),
    };

    let Some(last_segment) = path.rsplit('/').next() else {
        return DEFAULT_EXTENSION;
    };
    let Some(dot) = last_segment.rfind('.') else {
        return DEFAULT_EXTENSION;
    };

    let candidate = last_segment[dot..].to_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .find(|ext| **ext == candidate)
        .copied()
        .unwrap_or(DEFAULT_EXTENSION)
}

/// Strips filesystem-hostile characters from a path component
fn sanitize_component(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_extension_known_types() {
        assert_eq!(infer_extension("http://a.example/img/photo.jpg"), ".jpg");
        assert_eq!(infer_extension("http://a.example/img/photo.JPEG"), ".jpeg");
        assert_eq!(infer_extension("http://a.example/img/logo.png"), ".png");
        assert_eq!(infer_extension("http://a.example/img/anim.gif"), ".gif");
    }

    #[test]
    fn test_infer_extension_unknown_becomes_jpg() {
        assert_eq!(infer_extension("http://a.example/img/vector.svg"), ".jpg");
        assert_eq!(infer_extension("http://a.example/img/photo.webp"), ".jpg");
        assert_eq!(infer_extension("http://a.example/img/archive.bmp"), ".jpg");
    }

    #[test]
    fn test_infer_extension_missing_becomes_jpg() {
        assert_eq!(infer_extension("http://a.example/img/photo"), ".jpg");
        assert_eq!(infer_extension("http://a.example/"), ".jpg");
    }

    #[test]
    fn test_infer_extension_ignores_query() {
        assert_eq!(
            infer_extension("http://a.example/render?id=42&fmt=large"),
            ".jpg"
        );
        assert_eq!(
            infer_extension("http://a.example/img/photo.png?v=3"),
            ".png"
        );
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("Acme Machining"), "Acme Machining");
        assert_eq!(sanitize_component("A/B: \"Widgets\"?"), "AB Widgets");
        assert_eq!(sanitize_component("a<b>|c*"), "abc");
    }
}
