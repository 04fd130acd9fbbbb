//! Manifest documents: the upstream shape as fetched and the synthesized
//! shape served per configuration.
//!
//! An upstream addon advertises its capabilities at `GET {base}/manifest.json`:
//!
//! ```json
//! {
//!   "id": "org.example.movies",
//!   "name": "Example Movies",
//!   "types": ["movie", "series"],
//!   "idPrefixes": ["tt"],
//!   "catalogs": [
//!     { "id": "movies-top", "type": "movie", "name": "Top Movies" }
//!   ],
//!   "logo": "https://example.com/logo.png"
//! }
//! ```
//!
//! The proxy never trusts upstream field shapes: a field that fails to
//! deserialize degrades to its default instead of failing the whole
//! document. Unknown fields are preserved so catalog entries round-trip
//! through the synthesized manifest untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Protocol version advertised by every synthesized manifest.
pub const MANIFEST_VERSION: &str = "1.0.0";

/// Content type marking the channel category. Channel-typed requests get
/// their own routing rules (see the dispatch engine).
pub const CHANNEL_TYPE: &str = "channel";

/// Resource kinds every synthesized manifest declares, regardless of what
/// the bound upstreams support.
pub const DECLARED_RESOURCES: [&str; 5] =
    ["catalog", "meta", "stream", "subtitles", "channels"];

/// An upstream manifest as fetched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamManifest {
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub logo: String,
    #[serde(default, deserialize_with = "lenient")]
    pub types: Vec<String>,
    #[serde(default, deserialize_with = "lenient", rename = "idPrefixes")]
    pub id_prefixes: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub catalogs: Vec<CatalogEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One catalog listing declared by an upstream. The id doubles as the
/// routing key: an upstream answers a catalog request iff it declares a
/// catalog with the requested id.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CatalogEntry {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "lenient",
        rename = "type",
        skip_serializing_if = "String::is_empty"
    )]
    pub media_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The unified capability document exposed to clients for a configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedManifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<String>,
    #[serde(default, rename = "idPrefixes", skip_serializing_if = "Vec::is_empty")]
    pub id_prefixes: Vec<String>,
    pub catalogs: Vec<CatalogEntry>,
    pub logo: String,
}

/// Deserializes a field to its default when the upstream sent it in the
/// wrong shape ("malformed fields are absent" rule).
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_manifest() {
        let manifest: UpstreamManifest = serde_json::from_value(json!({
            "id": "org.example.movies",
            "name": "Example Movies",
            "types": ["movie", "series"],
            "idPrefixes": ["tt"],
            "catalogs": [{ "id": "movies-top", "type": "movie", "name": "Top Movies" }],
            "logo": "https://example.com/logo.png"
        }))
        .unwrap();

        assert_eq!(manifest.id, "org.example.movies");
        assert_eq!(manifest.types, vec!["movie", "series"]);
        assert_eq!(manifest.id_prefixes, vec!["tt"]);
        assert_eq!(manifest.catalogs.len(), 1);
        assert_eq!(manifest.catalogs[0].id, "movies-top");
        assert_eq!(manifest.catalogs[0].media_type, "movie");
        assert_eq!(
            manifest.catalogs[0].extra.get("name"),
            Some(&json!("Top Movies"))
        );
    }

    #[test]
    fn malformed_fields_degrade_to_absent() {
        let manifest: UpstreamManifest = serde_json::from_value(json!({
            "name": "Broken",
            "types": "movie",
            "catalogs": { "id": "not-an-array" },
            "logo": null
        }))
        .unwrap();

        assert_eq!(manifest.name, "Broken");
        assert!(manifest.types.is_empty());
        assert!(manifest.catalogs.is_empty());
        assert_eq!(manifest.logo, "");
    }

    #[test]
    fn missing_arrays_become_empty() {
        let manifest: UpstreamManifest = serde_json::from_value(json!({})).unwrap();
        assert!(manifest.types.is_empty());
        assert!(manifest.id_prefixes.is_empty());
        assert!(manifest.catalogs.is_empty());
    }

    #[test]
    fn catalog_entries_round_trip_unknown_fields() {
        let entry: CatalogEntry = serde_json::from_value(json!({
            "id": "top",
            "type": "movie",
            "extraSupported": ["search"],
            "name": "Top"
        }))
        .unwrap();

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back.get("id"), Some(&json!("top")));
        assert_eq!(back.get("type"), Some(&json!("movie")));
        assert_eq!(back.get("extraSupported"), Some(&json!(["search"])));
        assert_eq!(back.get("name"), Some(&json!("Top")));
    }

    #[test]
    fn catalog_entry_without_type_serializes_without_type_key() {
        let entry: CatalogEntry = serde_json::from_value(json!({ "id": "top" })).unwrap();
        let back = serde_json::to_value(&entry).unwrap();
        assert!(back.get("type").is_none());
    }
}
