pub mod api;
pub mod config;
pub mod dispatch;
pub mod manifest;
pub mod observability;
pub mod store;
pub mod upstream;
