//! Startup manifest discovery: one GET per upstream, all settled together.

use futures::future::join_all;
use serde_json::Value;
use tracing::{info, warn};

use super::UpstreamBinding;
use super::client::UpstreamFetch;
use crate::manifest::models::UpstreamManifest;

/// Fetches `{base}/manifest.json` for every base concurrently and binds the
/// upstreams that answered with a JSON body. Failures are logged and the
/// upstream dropped; one bad upstream never aborts the others. Binding
/// order follows `bases`.
pub async fn fetch_manifests(
    fetch: &dyn UpstreamFetch,
    config: &str,
    bases: &[String],
) -> Vec<UpstreamBinding> {
    let urls: Vec<String> = bases
        .iter()
        .map(|base| format!("{base}/manifest.json"))
        .collect();
    let settled = join_all(urls.iter().map(|url| fetch.get_json(url))).await;

    let mut bindings = Vec::new();
    for (base, outcome) in bases.iter().zip(settled) {
        match outcome {
            Ok(body) => bindings.push(UpstreamBinding {
                base: base.clone(),
                manifest: parse_manifest(body),
            }),
            Err(error) => warn!(
                config,
                base = %base,
                %error,
                "dropping upstream: manifest fetch failed"
            ),
        }
    }

    if bindings.is_empty() && !bases.is_empty() {
        warn!(config, "no upstream manifest could be fetched");
    } else {
        info!(
            config,
            bound = bindings.len(),
            configured = bases.len(),
            "upstream manifests bound"
        );
    }
    bindings
}

fn parse_manifest(body: Value) -> UpstreamManifest {
    // Field-level leniency lives in the model; a non-object body degrades
    // to the empty manifest.
    serde_json::from_value(body).unwrap_or_default()
}
