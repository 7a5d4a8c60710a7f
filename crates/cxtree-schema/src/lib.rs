//! # cxtree-schema
//!
//! JSON Schemas for everything cxtree writes: the per-file document
//! (`node_record`) and the batch summary (`batch_report`, `file_outcome`).
//! Schemas are generated from the `cxtree-core` types, so they cannot drift
//! from the serializer.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
