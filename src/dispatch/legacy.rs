//! Backward-compatible GET path routing.
//!
//! Older clients address resources with a single free-form GET path such as
//! `catalog/movie/movies-top.json`. Classification is an ordered prefix
//! table; anything outside it answers not-found. Note `meta/` is absent on
//! purpose: the legacy surface never carried metadata lookups.

use super::engine::{ResourceKind, ResourceRequest};

const LEGACY_PREFIXES: [(&str, ResourceKind); 4] = [
    ("catalog/", ResourceKind::Catalog),
    ("stream/", ResourceKind::Stream),
    ("subtitles/", ResourceKind::Subtitles),
    ("channels/", ResourceKind::Channels),
];

const JSON_SUFFIX: &str = ".json";

/// A classified legacy path: the resource kind plus whatever routing inputs
/// the path carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRoute {
    pub kind: ResourceKind,
    pub media_type: Option<String>,
    pub catalog_id: Option<String>,
}

impl LegacyRoute {
    pub fn to_request(&self) -> ResourceRequest {
        ResourceRequest {
            id: self.catalog_id.clone(),
            media_type: self.media_type.clone(),
        }
    }
}

/// Classifies a trailing legacy path. `None` means the path names no
/// supported resource.
pub fn classify(path: &str) -> Option<LegacyRoute> {
    let (_, kind) = LEGACY_PREFIXES
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))?;

    let segments: Vec<&str> = path.split('/').collect();
    let media_type = segments
        .get(1)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    // Catalog ids sit in the third segment, minus the `.json` suffix.
    let catalog_id = match kind {
        ResourceKind::Catalog => segments
            .get(2)
            .map(|s| s.strip_suffix(JSON_SUFFIX).unwrap_or(s).to_string())
            .filter(|s| !s.is_empty()),
        _ => None,
    };

    Some(LegacyRoute {
        kind: *kind,
        media_type,
        catalog_id,
    })
}
