use crate::UrlError;
use url::Url;

/// Canonicalizes a raw website string into an absolute, scheme-qualified URL
///
/// Roster files frequently carry bare hostnames ("acme.example") or URLs
/// without a scheme; those get an `http://` prefix before parsing, matching
/// how the sites themselves usually redirect. Already-qualified URLs pass
/// through unchanged.
///
/// # Arguments
///
/// * `raw` - The raw website string from the manufacturer roster
///
/// # Returns
///
/// * `Ok(Url)` - Absolute http(s) URL with a host
/// * `Err(UrlError)` - Malformed input, unsupported scheme, or no host
///
/// # Examples
///
/// ```
/// use forager::url::canonicalize_website;
///
/// let url = canonicalize_website("acme.example/shop").unwrap();
/// assert_eq!(url.as_str(), "http://acme.example/shop");
/// ```
pub fn canonicalize_website(raw: &str) -> Result<Url, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("empty website string".to_string()));
    }

    let qualified = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let url = Url::parse(&qualified).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links (same page anchors)
/// - invalid URLs or non-HTTP(S) URLs after resolution
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(absolute) => {
            if absolute.scheme() == "http" || absolute.scheme() == "https" {
                Some(absolute)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Tests whether a candidate URL belongs to the same site as the seed
///
/// The hosts must match (case-insensitive, `www.` stripped on both sides)
/// and the candidate's path must be prefixed by the seed's path. A raw
/// string-prefix comparison would accept `example.com.evil.com` as "under"
/// `example.com`; comparing parsed hosts closes that hole while keeping the
/// seed-subpath semantics: paths under the seed are in scope, sibling hosts
/// are not.
pub fn is_same_site(seed: &Url, candidate: &Url) -> bool {
    let (Some(seed_host), Some(candidate_host)) = (seed.host_str(), candidate.host_str()) else {
        return false;
    };

    if strip_www(seed_host).to_lowercase() != strip_www(candidate_host).to_lowercase() {
        return false;
    }

    candidate.path().starts_with(seed.path())
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_bare_hostname() {
        let url = canonicalize_website("acme.example").unwrap();
        assert_eq!(url.as_str(), "http://acme.example/");
    }

    #[test]
    fn test_canonicalize_keeps_https() {
        let url = canonicalize_website("https://acme.example/shop").unwrap();
        assert_eq!(url.as_str(), "https://acme.example/shop");
    }

    #[test]
    fn test_canonicalize_trims_whitespace() {
        let url = canonicalize_website("  acme.example  ").unwrap();
        assert_eq!(url.as_str(), "http://acme.example/");
    }

    #[test]
    fn test_canonicalize_rejects_empty() {
        assert!(canonicalize_website("").is_err());
    }

    #[test]
    fn test_canonicalize_rejects_hostless() {
        assert!(canonicalize_website("http://").is_err());
    }

    #[test]
    fn test_resolve_relative_link() {
        let base = Url::parse("http://acme.example/shop/").unwrap();
        let resolved = resolve_link(&base, "widgets.html").unwrap();
        assert_eq!(resolved.as_str(), "http://acme.example/shop/widgets.html");
    }

    #[test]
    fn test_resolve_absolute_link() {
        let base = Url::parse("http://acme.example/").unwrap();
        let resolved = resolve_link(&base, "https://other.example/page").unwrap();
        assert_eq!(resolved.as_str(), "https://other.example/page");
    }

    #[test]
    fn test_resolve_skips_special_schemes() {
        let base = Url::parse("http://acme.example/").unwrap();
        assert!(resolve_link(&base, "javascript:void(0)").is_none());
        assert!(resolve_link(&base, "mailto:sales@acme.example").is_none());
        assert!(resolve_link(&base, "tel:+15555550100").is_none());
        assert!(resolve_link(&base, "data:image/png;base64,AAAA").is_none());
    }

    #[test]
    fn test_resolve_skips_fragment_only() {
        let base = Url::parse("http://acme.example/page").unwrap();
        assert!(resolve_link(&base, "#contact").is_none());
    }

    #[test]
    fn test_resolve_skips_empty() {
        let base = Url::parse("http://acme.example/").unwrap();
        assert!(resolve_link(&base, "   ").is_none());
    }

    #[test]
    fn test_same_site_subpath() {
        let seed = Url::parse("http://acme.example/").unwrap();
        let candidate = Url::parse("http://acme.example/products/widgets").unwrap();
        assert!(is_same_site(&seed, &candidate));
    }

    #[test]
    fn test_same_site_www_variants_match() {
        let seed = Url::parse("http://acme.example/").unwrap();
        let candidate = Url::parse("http://www.acme.example/about").unwrap();
        assert!(is_same_site(&seed, &candidate));
    }

    #[test]
    fn test_same_site_rejects_sibling_host() {
        let seed = Url::parse("http://acme.example/").unwrap();
        let candidate = Url::parse("http://blog.acme.example/post").unwrap();
        assert!(!is_same_site(&seed, &candidate));
    }

    #[test]
    fn test_same_site_rejects_prefix_spoof() {
        // A raw string-prefix test would accept this.
        let seed = Url::parse("http://acme.example/").unwrap();
        let candidate = Url::parse("http://acme.example.evil.example/").unwrap();
        assert!(!is_same_site(&seed, &candidate));
    }

    #[test]
    fn test_same_site_respects_seed_path() {
        let seed = Url::parse("http://acme.example/shop/").unwrap();
        let inside = Url::parse("http://acme.example/shop/widgets").unwrap();
        let outside = Url::parse("http://acme.example/careers").unwrap();
        assert!(is_same_site(&seed, &inside));
        assert!(!is_same_site(&seed, &outside));
    }

    #[test]
    fn test_same_site_case_insensitive_host() {
        let seed = Url::parse("http://ACME.example/").unwrap();
        let candidate = Url::parse("http://acme.EXAMPLE/page").unwrap();
        assert!(is_same_site(&seed, &candidate));
    }
}
