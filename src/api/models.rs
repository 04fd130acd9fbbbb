//! API models for the AddonHub HTTP surface.
//!
//! The interesting response bodies live elsewhere: synthesized manifests in
//! [`crate::manifest::models`] and merged resource results in
//! [`crate::dispatch`]. This module only carries the envelope types owned
//! by the HTTP layer itself.
//!
//! Every non-2xx response uses the same error shape:
//!
//! ```json
//! { "error": "not found: configuration 'demo'" }
//! ```

use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, String>,
    pub configurations: usize,
    pub version: String,
}
