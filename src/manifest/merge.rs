//! Merge rules turning an ordered list of upstream bindings into one
//! synthesized manifest.

use crate::manifest::models::{
    CatalogEntry, DECLARED_RESOURCES, MANIFEST_VERSION, SynthesizedManifest,
};
use crate::upstream::UpstreamBinding;

/// Builds the manifest served for `config` from its bound upstreams.
///
/// Types and id prefixes are unioned keeping first-seen order. Catalogs are
/// concatenated in binding order without deduplication: two upstreams
/// declaring the same catalog id both stay listed, and requests for that id
/// fan out to both. The logo comes from the first binding.
pub fn synthesize(config: &str, bindings: &[UpstreamBinding]) -> SynthesizedManifest {
    let mut types: Vec<String> = Vec::new();
    let mut id_prefixes: Vec<String> = Vec::new();
    let mut catalogs: Vec<CatalogEntry> = Vec::new();

    for binding in bindings {
        for media_type in &binding.manifest.types {
            if !types.contains(media_type) {
                types.push(media_type.clone());
            }
        }
        for prefix in &binding.manifest.id_prefixes {
            if !id_prefixes.contains(prefix) {
                id_prefixes.push(prefix.clone());
            }
        }
        catalogs.extend(binding.manifest.catalogs.iter().cloned());
    }

    let logo = bindings
        .first()
        .map(|binding| binding.manifest.logo.clone())
        .unwrap_or_default();

    SynthesizedManifest {
        id: format!("org.addonhub.{config}"),
        version: MANIFEST_VERSION.to_string(),
        name: format!("AddonHub: {config}"),
        description: format!(
            "Aggregated addon serving {} upstream(s) for '{config}'",
            bindings.len()
        ),
        resources: DECLARED_RESOURCES.iter().map(|r| r.to_string()).collect(),
        types,
        id_prefixes,
        catalogs,
        logo,
    }
}
