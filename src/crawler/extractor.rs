//! HTML content extractor
//!
//! Pulls four things out of a fetched page: image references (with alt text
//! and source classification), same-site sublinks, menu links, and the
//! page's flattened text. Image dedup against the crawl-wide seen-set
//! happens here, at the extraction boundary, so a URL discovered via two
//! sources or on two pages is emitted at most once per crawl.

use crate::state::{CrawlState, ImageReference, ImageSource, ALT_TEXT_UNAVAILABLE};
use crate::url::{is_same_site, resolve_link};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::OnceLock;
use url::Url;

/// Lazy-load attribute preferred over `src` when both are present
const LAZY_SRC_ATTR: &str = "data-srclazy";

static BG_IMAGE_RE: OnceLock<Regex> = OnceLock::new();

fn bg_image_re() -> &'static Regex {
    BG_IMAGE_RE.get_or_init(|| {
        Regex::new(r#"background-image:\s*url\(([^)]*)\)"#).expect("valid background-image regex")
    })
}

/// Everything extracted from one page
#[derive(Debug)]
pub struct ExtractedContent {
    /// Newly discovered images (already deduped against the crawl state)
    pub images: Vec<ImageReference>,

    /// Same-site links in discovery order, deduped per page
    pub sublinks: Vec<Url>,

    /// Links found under menu/navigation containers
    pub menu_links: Vec<Url>,

    /// All visible text, whitespace-collapsed
    pub page_text: String,
}

/// Parses a page and extracts images, links, and text
///
/// # Arguments
///
/// * `html` - The page HTML
/// * `page_url` - Absolute URL of the page (base for relative references)
/// * `seed` - The domain's seed URL (scopes the same-site test)
/// * `state` - The crawl's shared dedup state; updated with newly seen
///   image URLs
pub fn extract_content(
    html: &str,
    page_url: &Url,
    seed: &Url,
    state: &mut CrawlState,
) -> ExtractedContent {
    let document = Html::parse_document(html);

    let page_text = flatten_text(&document);
    let images = extract_images(&document, page_url, &page_text, state);
    let sublinks = extract_sublinks(&document, page_url, seed);
    let menu_links = extract_menu_links(&document, page_url);

    ExtractedContent {
        images,
        sublinks,
        menu_links,
        page_text,
    }
}

/// Flattens all text nodes into a single whitespace-joined string
fn flatten_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts image references from img tags, style blocks, and inline styles
fn extract_images(
    document: &Html,
    page_url: &Url,
    page_text: &str,
    state: &mut CrawlState,
) -> Vec<ImageReference> {
    let mut images = Vec::new();

    // <img> elements, preferring the lazy-load attribute
    if let Ok(img_selector) = Selector::parse("img") {
        for element in document.select(&img_selector) {
            let Some(raw) = element
                .value()
                .attr(LAZY_SRC_ATTR)
                .or_else(|| element.value().attr("src"))
            else {
                continue;
            };

            if let Some(reference) = make_reference(
                raw,
                element.value().attr("alt"),
                ImageSource::ImgTag,
                page_url,
                page_text,
                state,
            ) {
                images.push(reference);
            }
        }
    }

    // background-image declarations in <style> blocks
    if let Ok(style_selector) = Selector::parse("style") {
        for element in document.select(&style_selector) {
            let css: String = element.text().collect();
            for capture in bg_image_re().captures_iter(&css) {
                let raw = capture[1].trim().trim_matches(|c| c == '\'' || c == '"');
                if let Some(reference) = make_reference(
                    raw,
                    None,
                    ImageSource::StyleBlock,
                    page_url,
                    page_text,
                    state,
                ) {
                    images.push(reference);
                }
            }
        }
    }

    // background-image declarations in inline style attributes
    if let Ok(styled_selector) = Selector::parse("[style]") {
        for element in document.select(&styled_selector) {
            let Some(style) = element.value().attr("style") else {
                continue;
            };
            if !style.contains("background-image") {
                continue;
            }
            for capture in bg_image_re().captures_iter(style) {
                let raw = capture[1].trim().trim_matches(|c| c == '\'' || c == '"');
                if let Some(reference) = make_reference(
                    raw,
                    None,
                    ImageSource::InlineStyle,
                    page_url,
                    page_text,
                    state,
                ) {
                    images.push(reference);
                }
            }
        }
    }

    images
}

/// Resolves one raw image URL and emits it if it clears the crawl-wide dedup
fn make_reference(
    raw: &str,
    alt: Option<&str>,
    source: ImageSource,
    page_url: &Url,
    page_text: &str,
    state: &mut CrawlState,
) -> Option<ImageReference> {
    if raw.trim().is_empty() || raw.trim().starts_with("data:") {
        return None;
    }

    let resolved = page_url.join(raw.trim()).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    if !state.mark_image_seen(resolved.as_str()) {
        return None;
    }

    Some(ImageReference {
        url: resolved.to_string(),
        alt_text: alt
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(ALT_TEXT_UNAVAILABLE)
            .to_string(),
        source,
        source_page: page_url.to_string(),
        page_context: page_text.to_string(),
    })
}

/// Extracts same-site anchors in discovery order, deduped per page
fn extract_sublinks(document: &Html, page_url: &Url, seed: &Url) -> Vec<Url> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(resolved) = resolve_link(page_url, href) else {
                continue;
            };
            if is_same_site(seed, &resolved) && seen.insert(resolved.to_string()) {
                links.push(resolved);
            }
        }
    }

    links
}

/// Extracts anchors under navigation containers whose class mentions "menu"
fn extract_menu_links(document: &Html, page_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let Ok(container_selector) = Selector::parse("nav, ul, div") else {
        return links;
    };
    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for container in document.select(&container_selector) {
        if !has_menu_class(&container) {
            continue;
        }
        for anchor in container.select(&anchor_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if let Some(resolved) = resolve_link(page_url, href) {
                if seen.insert(resolved.to_string()) {
                    links.push(resolved);
                }
            }
        }
    }

    links
}

fn has_menu_class(element: &ElementRef) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| class.to_lowercase().contains("menu"))
        .unwrap_or(false)
}
