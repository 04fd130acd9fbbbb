//! Manifest documents and the merge rules that unify them.

pub mod merge;
pub mod models;
