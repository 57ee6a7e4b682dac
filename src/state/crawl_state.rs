//! Per-domain crawl state
//!
//! One `CrawlState` is constructed when a domain crawl starts and discarded
//! when it finishes. It is owned exclusively by that crawl's task and is
//! never shared across domains, so no locking is needed anywhere in the
//! traversal: the work-list driver threads a `&mut CrawlState` through every
//! visit and extraction call.

use crate::state::ImageReference;
use std::collections::{HashMap, HashSet};

/// Mutable bookkeeping for one domain traversal
#[derive(Debug)]
pub struct CrawlState {
    /// URLs already visited this crawl (append-only)
    visited: HashSet<String>,

    /// Image URLs already emitted this crawl (dedup is crawl-global)
    seen_images: HashSet<String>,

    /// Accumulated image references across all visited pages
    images: Vec<ImageReference>,

    /// Flattened page text keyed by page URL
    page_contexts: HashMap<String, String>,

    /// Visit ceiling for this domain
    max_pages: usize,
}

impl CrawlState {
    /// Creates an empty state with the given page ceiling
    pub fn new(max_pages: usize) -> Self {
        Self {
            visited: HashSet::new(),
            seen_images: HashSet::new(),
            images: Vec::new(),
            page_contexts: HashMap::new(),
            max_pages,
        }
    }

    /// Returns true if the URL was already visited this crawl
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns true if the page ceiling has been reached
    pub fn at_page_ceiling(&self) -> bool {
        self.visited.len() >= self.max_pages
    }

    /// Attempts to claim a URL for visiting
    ///
    /// Returns false without mutating anything if the URL was already
    /// visited or the page ceiling is hit; queued siblings hitting either
    /// condition simply no-op.
    pub fn try_visit(&mut self, url: &str) -> bool {
        if self.at_page_ceiling() || self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string());
        true
    }

    /// Marks an image URL as seen; returns true only the first time
    pub fn mark_image_seen(&mut self, url: &str) -> bool {
        self.seen_images.insert(url.to_string())
    }

    /// Records a visited page's context and its newly discovered images
    pub fn record_page(&mut self, page_url: &str, page_text: String, images: Vec<ImageReference>) {
        self.page_contexts.insert(page_url.to_string(), page_text);
        self.images.extend(images);
    }

    /// Number of pages visited so far
    pub fn pages_visited(&self) -> usize {
        self.visited.len()
    }

    /// Number of unique images accumulated so far
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Consumes the state into a finished harvest result
    pub fn into_harvest(self, manufacturer: &str, ordinal: usize, website_url: &str) -> DomainHarvest {
        DomainHarvest {
            manufacturer: manufacturer.to_string(),
            ordinal,
            website_url: website_url.to_string(),
            images: self.images,
            page_contexts: self.page_contexts,
        }
    }
}

/// The accumulated result of one completed domain crawl
#[derive(Debug)]
pub struct DomainHarvest {
    /// Manufacturer display name
    pub manufacturer: String,

    /// Manufacturer roster ordinal (0-based)
    pub ordinal: usize,

    /// Canonical seed URL the crawl started from
    pub website_url: String,

    /// All unique image references discovered on the domain
    pub images: Vec<ImageReference>,

    /// Flattened page text keyed by page URL
    pub page_contexts: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ImageSource, ALT_TEXT_UNAVAILABLE};

    fn image(url: &str) -> ImageReference {
        ImageReference {
            url: url.to_string(),
            alt_text: ALT_TEXT_UNAVAILABLE.to_string(),
            source: ImageSource::ImgTag,
            source_page: "http://acme.example/".to_string(),
            page_context: "context".to_string(),
        }
    }

    #[test]
    fn test_try_visit_claims_once() {
        let mut state = CrawlState::new(10);
        assert!(state.try_visit("http://acme.example/"));
        assert!(!state.try_visit("http://acme.example/"));
        assert!(state.is_visited("http://acme.example/"));
        assert_eq!(state.pages_visited(), 1);
    }

    #[test]
    fn test_page_ceiling_blocks_new_visits() {
        let mut state = CrawlState::new(2);
        assert!(state.try_visit("http://acme.example/a"));
        assert!(state.try_visit("http://acme.example/b"));
        assert!(state.at_page_ceiling());
        assert!(!state.try_visit("http://acme.example/c"));
        assert_eq!(state.pages_visited(), 2);
    }

    #[test]
    fn test_image_dedup_is_crawl_global() {
        let mut state = CrawlState::new(10);
        assert!(state.mark_image_seen("http://acme.example/logo.png"));
        // Same URL discovered later, on a different page or via a
        // different source, is not emitted again.
        assert!(!state.mark_image_seen("http://acme.example/logo.png"));
    }

    #[test]
    fn test_record_page_accumulates() {
        let mut state = CrawlState::new(10);
        state.record_page(
            "http://acme.example/",
            "home text".to_string(),
            vec![image("http://acme.example/a.jpg")],
        );
        state.record_page(
            "http://acme.example/shop",
            "shop text".to_string(),
            vec![image("http://acme.example/b.jpg")],
        );
        assert_eq!(state.image_count(), 2);

        let harvest = state.into_harvest("Acme", 0, "http://acme.example/");
        assert_eq!(harvest.manufacturer, "Acme");
        assert_eq!(harvest.ordinal, 0);
        assert_eq!(harvest.images.len(), 2);
        assert_eq!(
            harvest.page_contexts.get("http://acme.example/shop"),
            Some(&"shop text".to_string())
        );
    }
}
