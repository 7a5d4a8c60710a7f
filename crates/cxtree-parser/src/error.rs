//! Parser error types for cxtree-parser.

use std::path::PathBuf;

use cxtree_core::FailureStage;

use crate::compdb::CompileDbError;

/// Errors that end the processing of one source file.
///
/// Per-attribute failures never surface here; they are omitted from the
/// record and reported through an `OmissionSink`.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    /// Raised before any parse is attempted.
    #[error("Compilation lookup failed: {0}")]
    CompilationLookup(#[from] CompileDbError),

    #[error("Parse failed for {}: {reason}", .file.display())]
    ParseFailed { file: PathBuf, reason: String },

    #[error("libclang unavailable: {0}")]
    FrontendUnavailable(String),

    #[error("Traversal of {} exceeded the maximum depth of {limit}", .file.display())]
    DepthExceeded { limit: usize, file: PathBuf },

    /// Another source of the same batch already wrote this document.
    #[error("Output {} was already written for {}", .path.display(), .previous.display())]
    OutputCollision { path: PathBuf, previous: PathBuf },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParserError {
    /// Which pipeline step this error belongs to.
    #[must_use]
    pub const fn stage(&self) -> FailureStage {
        match self {
            Self::CompilationLookup(_) => FailureStage::Lookup,
            Self::ParseFailed { .. } | Self::FrontendUnavailable(_) | Self::DepthExceeded { .. } => {
                FailureStage::Parse
            }
            Self::OutputCollision { .. } | Self::Serialize(_) | Self::Io(_) => {
                FailureStage::Output
            }
        }
    }
}
