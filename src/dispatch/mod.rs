//! The dispatch engine: routing, fan-out and merge for resource requests,
//! plus the legacy GET path adapter.

mod engine;
mod legacy;

pub use engine::{
    DispatchEngine, ResourceKind, ResourceRequest, ResourceResult, select_targets,
};
pub use legacy::{LegacyRoute, classify};
