//! Where and how documents are written.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Indent JSON documents.
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Default output directory for `cxtree parse`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            directory: None,
        }
    }
}
