//! Upstream discovery: base URL canonicalization, manifest fetching and the
//! outbound JSON transport.

mod client;
mod fetcher;
mod registry;

pub use client::{HttpFetcher, UpstreamError, UpstreamFetch};
pub use fetcher::fetch_manifests;
pub use registry::normalize_bases;

use crate::manifest::models::UpstreamManifest;

/// A successfully bound upstream: canonical base URL plus the manifest it
/// served at discovery time.
#[derive(Debug, Clone)]
pub struct UpstreamBinding {
    pub base: String,
    pub manifest: UpstreamManifest,
}
