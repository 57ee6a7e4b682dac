//! Download job planning
//!
//! Flattens per-domain harvests into a single job list. Sequence numbers
//! are assigned here, at enqueue time, by a per-manufacturer counter:
//! strictly increasing and gapless regardless of how the downloads later
//! fare. Images past the naming ceiling never become jobs at all.

use crate::download::namer::MAX_SEQUENCE;
use crate::state::{DomainHarvest, ImageReference};
use std::collections::HashMap;

/// One image queued for download
#[derive(Debug, Clone)]
pub struct DownloadJob {
    /// Manufacturer display name
    pub manufacturer: String,

    /// Manufacturer roster ordinal (0-based)
    pub ordinal: usize,

    /// Per-manufacturer sequence number, 1-based, assigned at enqueue time
    pub sequence: u32,

    /// The harvested image reference
    pub image: ImageReference,
}

/// Builds the download job list from harvested domains
///
/// The counter map is keyed by manufacturer name so a manufacturer's
/// sequence stays monotonic even if it somehow appears in more than one
/// harvest. This is the single writer for sequence numbers; the downloader
/// only reads them.
pub fn plan_jobs(harvests: &[DomainHarvest]) -> Vec<DownloadJob> {
    let mut jobs = Vec::new();
    let mut counters: HashMap<&str, u32> = HashMap::new();

    for harvest in harvests {
        let counter = counters.entry(harvest.manufacturer.as_str()).or_insert(0);

        for image in &harvest.images {
            if *counter >= MAX_SEQUENCE {
                tracing::warn!(
                    "{}: naming ceiling ({}) reached, skipping remaining images",
                    harvest.manufacturer,
                    MAX_SEQUENCE
                );
                break;
            }
            *counter += 1;

            jobs.push(DownloadJob {
                manufacturer: harvest.manufacturer.clone(),
                ordinal: harvest.ordinal,
                sequence: *counter,
                image: image.clone(),
            });
        }
    }

    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ImageSource, ALT_TEXT_UNAVAILABLE};
    use std::collections::HashMap as StdHashMap;

    fn image(url: &str) -> ImageReference {
        ImageReference {
            url: url.to_string(),
            alt_text: ALT_TEXT_UNAVAILABLE.to_string(),
            source: ImageSource::ImgTag,
            source_page: "http://acme.example/".to_string(),
            page_context: "context".to_string(),
        }
    }

    fn harvest(manufacturer: &str, ordinal: usize, image_count: usize) -> DomainHarvest {
        DomainHarvest {
            manufacturer: manufacturer.to_string(),
            ordinal,
            website_url: "http://acme.example/".to_string(),
            images: (0..image_count)
                .map(|i| image(&format!("http://acme.example/img/{}.jpg", i)))
                .collect(),
            page_contexts: StdHashMap::new(),
        }
    }

    #[test]
    fn test_sequences_start_at_one_and_are_gapless() {
        let harvests = vec![harvest("Acme", 0, 3)];
        let jobs = plan_jobs(&harvests);
        let sequences: Vec<u32> = jobs.iter().map(|j| j.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[test]
    fn test_counters_are_per_manufacturer() {
        let harvests = vec![harvest("Acme", 0, 2), harvest("Borealis", 1, 2)];
        let jobs = plan_jobs(&harvests);
        assert_eq!(jobs.len(), 4);
        assert_eq!(jobs[2].manufacturer, "Borealis");
        assert_eq!(jobs[2].sequence, 1);
        assert_eq!(jobs[3].ordinal, 1);
    }

    #[test]
    fn test_ceiling_stops_job_issuance() {
        let harvests = vec![harvest("Acme", 0, MAX_SEQUENCE as usize + 10)];
        let jobs = plan_jobs(&harvests);
        assert_eq!(jobs.len(), MAX_SEQUENCE as usize);
        assert_eq!(jobs.last().unwrap().sequence, MAX_SEQUENCE);
    }

    #[test]
    fn test_job_preserves_image_reference() {
        let harvests = vec![harvest("Acme", 0, 1)];
        let jobs = plan_jobs(&harvests);
        assert_eq!(jobs[0].image.url, "http://acme.example/img/0.jpg");
        assert_eq!(jobs[0].image.source, ImageSource::ImgTag);
        assert_eq!(jobs[0].image.page_context, "context");
    }

    #[test]
    fn test_empty_harvests_plan_no_jobs() {
        assert!(plan_jobs(&[]).is_empty());
    }
}
