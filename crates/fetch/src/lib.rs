//! Download-link discovery for MGBase assembly pages.
//!
//! Fetches a single listing page and keeps the anchors that point at the
//! download endpoint for files with the configured suffix.

mod config;
mod links;

pub use config::{FetchConfig, DEFAULT_BASE_URL};
pub use links::{extract_download_links, fetch_download_links};
