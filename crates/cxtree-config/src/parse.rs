//! Front-end and traversal settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_depth() -> usize {
    1024
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParseConfig {
    /// Deepest record the tree builder may produce before giving up on a file.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Keep inclusion directives and macro records in the tree.
    #[serde(default = "default_true")]
    pub detailed_preprocessing_record: bool,

    #[serde(default)]
    pub skip_function_bodies: bool,

    /// Compiler arguments appended after the compilation database's.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            detailed_preprocessing_record: true,
            skip_function_bodies: false,
            extra_args: Vec::new(),
        }
    }
}

impl ParseConfig {
    /// # Errors
    ///
    /// `InvalidValue` when `max_depth` is zero, which would reject every unit
    /// with a single child.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "parse.max_depth".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
