//! Front-ends: whatever turns a source file plus compiler arguments into a
//! record tree.

pub mod libclang;

use std::path::Path;

use cxtree_core::NodeRecord;

use crate::error::ParserError;
use crate::omission::OmissionSink;
use crate::tree::TreeBuilder;

pub use self::libclang::ClangFrontend;

/// Parses one source file and builds its normalized record tree.
pub trait Frontend {
    /// # Errors
    ///
    /// `ParseFailed` or `FrontendUnavailable` when no tree can be produced,
    /// `DepthExceeded` when the tree is deeper than the builder allows.
    fn parse(
        &self,
        source: &Path,
        arguments: &[String],
        sink: &mut dyn OmissionSink,
    ) -> Result<NodeRecord, ParserError>;
}

impl<F: Frontend + ?Sized> Frontend for &F {
    fn parse(
        &self,
        source: &Path,
        arguments: &[String],
        sink: &mut dyn OmissionSink,
    ) -> Result<NodeRecord, ParserError> {
        (**self).parse(source, arguments, sink)
    }
}

/// How the libclang front-end parses and traverses a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_depth: usize,
    /// Keep inclusion directives and macro nodes in the raw tree.
    pub detailed_preprocessing_record: bool,
    pub skip_function_bodies: bool,
    /// Appended after the compilation database arguments.
    pub extra_args: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: TreeBuilder::DEFAULT_MAX_DEPTH,
            detailed_preprocessing_record: true,
            skip_function_bodies: false,
            extra_args: Vec::new(),
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub const fn tree_builder(&self) -> TreeBuilder {
        TreeBuilder::new(self.max_depth)
    }

    /// Database arguments followed by `extra_args`.
    #[must_use]
    pub fn arguments(&self, database_arguments: &[String]) -> Vec<String> {
        database_arguments
            .iter()
            .chain(&self.extra_args)
            .cloned()
            .collect()
    }
}
