//! State module for tracking a domain crawl
//!
//! # Components
//!
//! - `CrawlState`: single-owner visited/dedup bookkeeping for one domain
//! - `DomainHarvest`: the accumulated result a crawl hands back
//! - `ImageReference` / `ImageSource`: harvested image provenance records

mod crawl_state;
mod image;

pub use crawl_state::{CrawlState, DomainHarvest};
pub use image::{ImageReference, ImageSource, ALT_TEXT_UNAVAILABLE};
