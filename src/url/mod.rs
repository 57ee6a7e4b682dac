//! URL handling module for Forager
//!
//! Canonicalizes raw roster website strings, resolves hrefs against a base
//! page, and decides whether a discovered link stays inside the seed site.

mod normalize;

pub use normalize::{canonicalize_website, is_same_site, resolve_link};
