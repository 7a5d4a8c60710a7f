//! # cxtree-parser
//!
//! Turns a C/C++ translation unit into a serializable [`NodeRecord`] tree.
//!
//! - [`catalog`]: per-category capability tables and the denylist
//! - [`harvest`]: invokes every capability with per-member failure isolation
//! - [`tree`]: file-scoped depth-first traversal with a depth guard
//! - [`normalize`]: rewrites the three snapshot-valued keys into strings
//! - [`serialize`]: deterministic JSON documents
//! - [`frontend`]: the libclang adapter; [`memory`] is a scripted stand-in
//! - [`compdb`] and [`pipeline`]: compile command lookup, single-file and
//!   batch processing
//!
//! [`NodeRecord`]: cxtree_core::NodeRecord

pub mod catalog;
pub mod compdb;
pub mod error;
pub mod frontend;
pub mod harvest;
pub mod memory;
pub mod normalize;
pub mod omission;
pub mod pipeline;
pub mod serialize;
pub mod tree;

pub use catalog::{Capability, Catalog, CatalogListing, DENYLIST};
pub use compdb::{CompilationDatabase, CompileCommand, CompileDbError};
pub use error::ParserError;
pub use frontend::{ClangFrontend, Frontend, ParseOptions};
pub use harvest::{
    Harvest, Introspect, Probe, harvest, harvest_invalid, quiet_capability_panics,
};
pub use normalize::normalize;
pub use omission::{CollectOmissions, DiscardOmissions, Omission, OmissionSink, TraceOmissions};
pub use pipeline::Pipeline;
pub use serialize::{DocumentWriter, output_path, to_document, to_json, write_document, write_json};
pub use tree::{SyntaxNode, TreeBuilder};
