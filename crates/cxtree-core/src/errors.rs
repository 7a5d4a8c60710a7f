//! Cross-cutting error types for cxtree.
//!
//! Domain-specific errors (`ParserError`, `CompileDbError`, `ConfigError`,
//! `SchemaError`) live in their own crates. The CLI converges them into
//! `anyhow::Error`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A category name did not match `kind`, `node` or `type`.
    #[error("Unknown attribute category: {0}")]
    UnknownCategory(String),

    /// A child record's depth is not its parent's depth plus one.
    #[error("Depth mismatch at {path}: expected {expected}, found {found}")]
    DepthMismatch {
        path: String,
        expected: usize,
        found: usize,
    },
}
