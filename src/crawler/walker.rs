//! Domain crawler
//!
//! Walks one manufacturer's website from its seed URL: robots gate first,
//! then a depth-first traversal of same-site pages driven by an explicit
//! work-list (deep or cyclic site graphs must not be able to blow the call
//! stack). The traversal is intentionally serialized within a domain so the
//! politeness delay is meaningful and the crawl state stays single-owner.
//!
//! Failure semantics: a robots fetch failure or an unfetchable seed page
//! abandons the whole domain (`None`); any other page failure only skips
//! that page.

use crate::config::{CrawlConfig, ManufacturerEntry};
use crate::crawler::extractor::extract_content;
use crate::crawler::fetcher::fetch_page;
use crate::robots::{fetch_robots, RobotsPolicy};
use crate::state::{CrawlState, DomainHarvest};
use crate::url::canonicalize_website;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Crawls a single manufacturer domain
pub struct DomainCrawler {
    client: Client,
    config: CrawlConfig,
}

impl DomainCrawler {
    /// Creates a crawler sharing the given HTTP client
    pub fn new(client: Client, config: CrawlConfig) -> Self {
        Self { client, config }
    }

    /// Runs the full domain crawl for one manufacturer
    ///
    /// # Returns
    ///
    /// * `Some(DomainHarvest)` - Accumulated images and page contexts
    /// * `None` - Domain abandoned (bad website URL, robots unavailable,
    ///   or seed page unfetchable)
    pub async fn crawl(&self, entry: &ManufacturerEntry) -> Option<DomainHarvest> {
        let seed = match canonicalize_website(&entry.website) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("{}: unusable website '{}': {}", entry.name, entry.website, e);
                return None;
            }
        };

        let policy = match fetch_robots(&self.client, &seed).await {
            Ok(policy) => policy,
            Err(e) => {
                tracing::warn!("{}: abandoning domain, no robots policy: {}", entry.name, e);
                return None;
            }
        };

        // The seed page doubles as the menu source; if it cannot be fetched
        // there is nothing to traverse.
        let seed_html = match fetch_page(&self.client, &seed, self.config.fetch_retries).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("{}: seed page unfetchable: {}", entry.name, e);
                return None;
            }
        };

        let mut state = CrawlState::new(self.config.max_pages_per_domain as usize);
        let menu_links = {
            // Throwaway state: this pass only harvests the menu, the real
            // visit of the seed page happens in the work-list below.
            let mut menu_probe = CrawlState::new(self.config.max_pages_per_domain as usize);
            extract_content(&seed_html, &seed, &seed, &mut menu_probe).menu_links
        };

        tracing::info!(
            "{}: crawling {} ({} menu links)",
            entry.name,
            seed,
            menu_links.len()
        );

        self.visit_subtree(seed.clone(), &seed, &policy, &mut state)
            .await;

        for menu_link in menu_links {
            self.politeness_pause().await;
            self.visit_subtree(menu_link, &seed, &policy, &mut state)
                .await;
        }

        tracing::info!(
            "{}: done, {} pages visited, {} images found",
            entry.name,
            state.pages_visited(),
            state.image_count()
        );

        Some(state.into_harvest(&entry.name, entry.ordinal, seed.as_str()))
    }

    /// Depth-first traversal from one entry point
    ///
    /// Sublinks are pushed in reverse so the work-list pops them in
    /// discovery order. Already-visited, robots-denied, and over-ceiling
    /// URLs no-op; fetch failures skip the page and its undiscovered
    /// subtree but never abort the crawl.
    async fn visit_subtree(
        &self,
        root: Url,
        seed: &Url,
        policy: &RobotsPolicy,
        state: &mut CrawlState,
    ) {
        let mut work_list = vec![root];

        while let Some(url) = work_list.pop() {
            if state.is_visited(url.as_str()) {
                continue;
            }
            if !policy.is_allowed(url.as_str()) {
                tracing::debug!("robots disallows {}", url);
                continue;
            }
            if !state.try_visit(url.as_str()) {
                // Page ceiling hit; drain remaining work as no-ops.
                continue;
            }

            let html = match fetch_page(&self.client, &url, self.config.fetch_retries).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("skipping {}: {}", url, e);
                    continue;
                }
            };

            let content = extract_content(&html, &url, seed, state);
            tracing::debug!(
                "visited {} ({} images, {} sublinks)",
                url,
                content.images.len(),
                content.sublinks.len()
            );
            state.record_page(url.as_str(), content.page_text, content.images);

            for sublink in content.sublinks.into_iter().rev() {
                if !state.is_visited(sublink.as_str()) {
                    work_list.push(sublink);
                }
            }

            self.politeness_pause().await;
        }
    }

    async fn politeness_pause(&self) {
        if self.config.politeness_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.politeness_delay_ms)).await;
        }
    }
}
