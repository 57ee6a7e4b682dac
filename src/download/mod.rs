//! Download module for naming, planning, and fetching harvested images
//!
//! This module turns per-domain harvests into stored files:
//! - Deterministic structured names from roster ordinal and sequence number
//! - Job planning with per-manufacturer gapless sequence counters
//! - Concurrent, independently-failing downloads with atomic writes

mod downloader;
mod jobs;
mod namer;

pub use downloader::{build_download_client, download_batch, infer_extension, DownloadedImage};
pub use jobs::{plan_jobs, DownloadJob};
pub use namer::{image_name, MAX_SEQUENCE, NAME_PREFIX};
