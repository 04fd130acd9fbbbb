use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::collections::HashMap;

use super::{models::HealthResponse, state::AppState};
use crate::api::error::ApiError;
use crate::dispatch::{ResourceKind, ResourceRequest, ResourceResult, classify};

/// Synthesized manifest endpoint (GET /{config}/manifest.json)
///
/// The only place an unknown or uninitialized configuration surfaces as an
/// error: resource endpoints below answer those with empty results instead.
pub async fn manifest(
    State(state): State<AppState>,
    Path(config): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let manifest = state
        .store
        .manifest(&config)
        .ok_or_else(|| ApiError::NotFound(format!("configuration '{config}'")))?
        .clone();
    state.metrics.manifest_served();
    Ok(Json(manifest))
}

pub async fn catalog(
    state: State<AppState>,
    path: Path<String>,
    body: Bytes,
) -> Result<Json<ResourceResult>, ApiError> {
    resource(state, path, ResourceKind::Catalog, body).await
}

pub async fn meta(
    state: State<AppState>,
    path: Path<String>,
    body: Bytes,
) -> Result<Json<ResourceResult>, ApiError> {
    resource(state, path, ResourceKind::Meta, body).await
}

pub async fn stream(
    state: State<AppState>,
    path: Path<String>,
    body: Bytes,
) -> Result<Json<ResourceResult>, ApiError> {
    resource(state, path, ResourceKind::Stream, body).await
}

pub async fn subtitles(
    state: State<AppState>,
    path: Path<String>,
    body: Bytes,
) -> Result<Json<ResourceResult>, ApiError> {
    resource(state, path, ResourceKind::Subtitles, body).await
}

pub async fn channels(
    state: State<AppState>,
    path: Path<String>,
    body: Bytes,
) -> Result<Json<ResourceResult>, ApiError> {
    resource(state, path, ResourceKind::Channels, body).await
}

/// Shared POST resource flow: parse the routing fields out of the body,
/// then forward the raw bytes unchanged to every selected upstream.
async fn resource(
    State(state): State<AppState>,
    Path(config): Path<String>,
    kind: ResourceKind,
    body: Bytes,
) -> Result<Json<ResourceResult>, ApiError> {
    let request = parse_request(&body)?;
    let result = state.engine.dispatch(&config, kind, &request, body).await;
    Ok(Json(result))
}

/// Channel listing endpoint (GET /{config}/channels)
///
/// Convenience alias for a POST with an empty body.
pub async fn channels_listing(
    State(state): State<AppState>,
    Path(config): Path<String>,
) -> Json<ResourceResult> {
    let result = state
        .engine
        .dispatch(
            &config,
            ResourceKind::Channels,
            &ResourceRequest::default(),
            Bytes::new(),
        )
        .await;
    Json(result)
}

/// Legacy GET adapter (GET /{config}/{*path})
///
/// Classifies the free-form trailing path and replays it against the
/// eligible upstreams. Unrecognized prefixes are the one legacy case that
/// returns 404.
pub async fn legacy(
    State(state): State<AppState>,
    Path((config, path)): Path<(String, String)>,
) -> Result<Json<ResourceResult>, ApiError> {
    let route =
        classify(&path).ok_or_else(|| ApiError::NotFound(format!("resource path '{path}'")))?;
    let result = state.engine.dispatch_legacy(&config, &route, &path).await;
    Ok(Json(result))
}

/// Empty bodies count as the empty request; anything else must be JSON.
/// Unknown fields are kept for the upstreams but ignored for routing.
fn parse_request(body: &Bytes) -> Result<ResourceRequest, ApiError> {
    if body.is_empty() {
        return Ok(ResourceRequest::default());
    }
    Ok(serde_json::from_slice(body)?)
}

/// Health check endpoint (GET /health)
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let mut components = HashMap::new();

    // In v0 we assume healthy if running; the store is built before the
    // router exists.
    components.insert("api".to_string(), "healthy".to_string());
    components.insert("store".to_string(), "healthy".to_string());

    let response = HealthResponse {
        status: "healthy".to_string(),
        components,
        configurations: state.store.len(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
