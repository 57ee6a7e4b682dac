//! Robots.txt gate
//!
//! Fetches and parses a domain's robots policy once per domain crawl. A
//! domain without a confirmable policy is not crawled at all: any non-200
//! status or transport failure on the robots fetch yields
//! [`RobotsUnavailable`], which the walker treats as domain-fatal. Refusing
//! to assume unrestricted access when the rules cannot be read is the
//! conservative reading of the robots contract.

mod parser;

pub use parser::RobotsPolicy;

use reqwest::Client;
use thiserror::Error;
use url::Url;

/// Why a domain's robots policy could not be established
#[derive(Debug, Error)]
pub enum RobotsUnavailable {
    #[error("robots.txt returned HTTP {0}")]
    Status(u16),

    #[error("robots.txt fetch failed: {0}")]
    Transport(String),
}

/// Fetches and parses robots.txt for the domain of the given seed URL
///
/// # Arguments
///
/// * `client` - The shared crawl HTTP client
/// * `seed` - The domain's canonical seed URL
///
/// # Returns
///
/// * `Ok(RobotsPolicy)` - Policy handle answering allow/deny queries
/// * `Err(RobotsUnavailable)` - No policy could be confirmed; the caller
///   must abandon the domain
pub async fn fetch_robots(client: &Client, seed: &Url) -> Result<RobotsPolicy, RobotsUnavailable> {
    let robots_url = seed
        .join("/robots.txt")
        .map_err(|e| RobotsUnavailable::Transport(e.to_string()))?;

    let response = client
        .get(robots_url.clone())
        .send()
        .await
        .map_err(|e| RobotsUnavailable::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("robots.txt for {} returned HTTP {}", seed, status.as_u16());
        return Err(RobotsUnavailable::Status(status.as_u16()));
    }

    let content = response
        .text()
        .await
        .map_err(|e| RobotsUnavailable::Transport(e.to_string()))?;

    if content.trim().is_empty() {
        Ok(RobotsPolicy::allow_all())
    } else {
        Ok(RobotsPolicy::from_content(&content))
    }
}
