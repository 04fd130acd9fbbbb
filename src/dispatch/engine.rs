//! Request dispatch: target selection, concurrent fan-out and merge.

use std::sync::Arc;

use bytes::Bytes;
use futures::future::join_all;
use serde::Deserialize;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use super::legacy::LegacyRoute;
use crate::manifest::models::CHANNEL_TYPE;
use crate::observability::Metrics;
use crate::store::ConfigurationStore;
use crate::upstream::{UpstreamBinding, UpstreamError, UpstreamFetch};

/// The resource operations the proxy fans out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Catalog,
    Meta,
    Stream,
    Subtitles,
    Channels,
}

impl ResourceKind {
    /// Path segment addressed on the upstream.
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::Catalog => "catalog",
            ResourceKind::Meta => "meta",
            ResourceKind::Stream => "stream",
            ResourceKind::Subtitles => "subtitles",
            ResourceKind::Channels => "channels",
        }
    }

    /// Field under which upstreams return, and the proxy merges, results.
    pub fn response_key(self) -> &'static str {
        match self {
            ResourceKind::Catalog | ResourceKind::Meta => "metas",
            ResourceKind::Stream => "streams",
            ResourceKind::Subtitles => "subtitles",
            ResourceKind::Channels => "channels",
        }
    }
}

/// Routing view of an inbound resource request body. Clients may send more
/// fields; only these two steer target selection and the raw body is what
/// gets forwarded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
}

impl ResourceRequest {
    pub fn is_channel(&self) -> bool {
        self.media_type.as_deref() == Some(CHANNEL_TYPE)
    }
}

/// Merged outcome of one dispatch: the resource key with the concatenated
/// upstream arrays. Serializes as `{"<key>": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResult {
    pub key: &'static str,
    pub items: Vec<Value>,
}

impl ResourceResult {
    pub fn empty(kind: ResourceKind) -> Self {
        Self {
            key: kind.response_key(),
            items: Vec::new(),
        }
    }
}

impl Serialize for ResourceResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.items)?;
        map.end()
    }
}

/// Picks the bindings eligible to answer `kind` for `request`, preserving
/// binding order.
///
/// Catalog and meta requests go only to upstreams declaring the requested
/// catalog id, except channel-typed ones which skip the id filter entirely.
/// Stream requests go to every upstream unless channel-typed, then only to
/// upstreams whose manifest lists the channel type. Subtitles always fan
/// out to everyone; the channels resource only to channel-capable
/// upstreams.
pub fn select_targets<'a>(
    bindings: &'a [UpstreamBinding],
    kind: ResourceKind,
    request: &ResourceRequest,
) -> Vec<&'a UpstreamBinding> {
    let all = bindings.iter();
    match kind {
        ResourceKind::Catalog | ResourceKind::Meta => {
            if request.is_channel() {
                all.collect()
            } else {
                match request.id.as_deref() {
                    Some(id) => all.filter(|b| owns_catalog(b, id)).collect(),
                    None => Vec::new(),
                }
            }
        }
        ResourceKind::Stream => {
            if request.is_channel() {
                all.filter(|b| serves_channels(b)).collect()
            } else {
                all.collect()
            }
        }
        ResourceKind::Subtitles => all.collect(),
        ResourceKind::Channels => all.filter(|b| serves_channels(b)).collect(),
    }
}

fn owns_catalog(binding: &UpstreamBinding, id: &str) -> bool {
    binding.manifest.catalogs.iter().any(|c| c.id == id)
}

fn serves_channels(binding: &UpstreamBinding) -> bool {
    binding.manifest.types.iter().any(|t| t == CHANNEL_TYPE)
}

/// Fans resource requests out to the eligible upstreams of a configuration
/// and merges their arrays. Holds no per-request state.
pub struct DispatchEngine {
    store: Arc<ConfigurationStore>,
    fetch: Arc<dyn UpstreamFetch>,
    metrics: Arc<Metrics>,
}

impl DispatchEngine {
    pub fn new(
        store: Arc<ConfigurationStore>,
        fetch: Arc<dyn UpstreamFetch>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            store,
            fetch,
            metrics,
        }
    }

    /// POST dispatch. Unknown configurations and empty target sets yield
    /// the empty result, never an error.
    pub async fn dispatch(
        &self,
        config: &str,
        kind: ResourceKind,
        request: &ResourceRequest,
        payload: Bytes,
    ) -> ResourceResult {
        self.metrics.dispatch();
        let Some(entry) = self.store.get(config) else {
            debug!(config, "dispatch for unknown configuration");
            return ResourceResult::empty(kind);
        };

        let targets = select_targets(&entry.bindings, kind, request);
        let payload = if payload.is_empty() {
            Bytes::from_static(b"{}")
        } else {
            payload
        };
        let urls: Vec<String> = targets
            .iter()
            .map(|b| format!("{}/{}", b.base, kind.endpoint()))
            .collect();
        debug!(config, kind = kind.endpoint(), targets = urls.len(), "fanning out");

        let settled =
            join_all(urls.iter().map(|url| self.fetch.post_json(url, payload.clone()))).await;
        self.merge(kind, &targets, settled)
    }

    /// Legacy GET dispatch: same routing and merge, but the original
    /// trailing path is replayed verbatim against each eligible upstream.
    pub async fn dispatch_legacy(
        &self,
        config: &str,
        route: &LegacyRoute,
        trailing: &str,
    ) -> ResourceResult {
        self.metrics.legacy_request();
        let Some(entry) = self.store.get(config) else {
            debug!(config, "legacy dispatch for unknown configuration");
            return ResourceResult::empty(route.kind);
        };

        let request = route.to_request();
        let targets = select_targets(&entry.bindings, route.kind, &request);
        let urls: Vec<String> = targets
            .iter()
            .map(|b| format!("{}/{trailing}", b.base))
            .collect();
        debug!(config, path = trailing, targets = urls.len(), "replaying legacy path");

        let settled = join_all(urls.iter().map(|url| self.fetch.get_json(url))).await;
        self.merge(route.kind, &targets, settled)
    }

    /// Concatenates the arrays under the resource key in target order. A
    /// failed call or a body without the key contributes nothing.
    fn merge(
        &self,
        kind: ResourceKind,
        targets: &[&UpstreamBinding],
        settled: Vec<Result<Value, UpstreamError>>,
    ) -> ResourceResult {
        let key = kind.response_key();
        let mut items: Vec<Value> = Vec::new();
        for (binding, outcome) in targets.iter().zip(settled) {
            self.metrics.upstream_call();
            match outcome {
                Ok(body) => match body.get(key).and_then(Value::as_array) {
                    Some(values) => items.extend(values.iter().cloned()),
                    None => debug!(base = %binding.base, key, "upstream response lacks resource array"),
                },
                Err(error) => {
                    self.metrics.upstream_failure();
                    warn!(base = %binding.base, %error, "upstream call failed during fan-out");
                }
            }
        }
        ResourceResult { key, items }
    }
}
