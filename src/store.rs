//! Process-wide configuration store: built once at startup, read-only while
//! serving. A reload is a rebuild plus swap, never in-place mutation.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::info;

use crate::config::Config;
use crate::manifest::merge::synthesize;
use crate::manifest::models::SynthesizedManifest;
use crate::upstream::{UpstreamBinding, UpstreamFetch, fetch_manifests, normalize_bases};

/// One initialized configuration: its ordered bindings plus the manifest
/// synthesized from them.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub name: String,
    pub bindings: Vec<UpstreamBinding>,
    pub manifest: SynthesizedManifest,
}

/// Immutable map from configuration name to its entry.
#[derive(Debug, Default)]
pub struct ConfigurationStore {
    entries: HashMap<String, ConfigEntry>,
}

impl ConfigurationStore {
    /// Discovers and binds every configured upstream, all configurations
    /// concurrently. A configuration whose upstreams all failed stays
    /// present with zero bindings so resource requests still answer with
    /// empty results.
    pub async fn initialize(config: &Config, fetch: &dyn UpstreamFetch) -> Self {
        let builds = config.configs.iter().map(|(name, source)| async move {
            let bases = normalize_bases(&source.upstreams);
            let bindings = fetch_manifests(fetch, name, &bases).await;
            let manifest = synthesize(name, &bindings);
            ConfigEntry {
                name: name.clone(),
                bindings,
                manifest,
            }
        });

        let mut entries = HashMap::new();
        for entry in join_all(builds).await {
            entries.insert(entry.name.clone(), entry);
        }
        info!(configurations = entries.len(), "configuration store initialized");
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&ConfigEntry> {
        self.entries.get(name)
    }

    /// The synthesized manifest, or `None` when the configuration is
    /// unknown or bound zero upstreams. Uninitialized configurations stay
    /// invisible on the manifest endpoint.
    pub fn manifest(&self, name: &str) -> Option<&SynthesizedManifest> {
        self.entries
            .get(name)
            .filter(|entry| !entry.bindings.is_empty())
            .map(|entry| &entry.manifest)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
