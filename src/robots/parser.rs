//! Robots.txt policy wrapper
//!
//! Thin wrapper around the robotstxt crate providing the allow/deny queries
//! the domain crawler needs. Forager always queries with the wildcard
//! user-agent; unparseable or empty robots files are treated as allow-all.

use robotstxt::DefaultMatcher;

/// Wildcard user-agent used for all robots queries
const WILDCARD_AGENT: &str = "*";

/// Parsed robots.txt policy for one domain
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// Whether to allow all regardless of content
    allow_all: bool,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    ///
    /// # Arguments
    ///
    /// * `content` - The raw robots.txt file content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive policy that allows everything
    ///
    /// Used when a domain serves an empty robots.txt.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Checks if a URL is allowed under the wildcard user-agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    ///
    /// # Returns
    ///
    /// * `true` - If the URL may be fetched
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str) -> bool {
        if self.allow_all || self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, WILDCARD_AGENT, url)
    }
}
