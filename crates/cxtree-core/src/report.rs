//! Outcome of a batch run over several source files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which step of the per-file pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// No usable compile command (missing/malformed database, no entry).
    Lookup,
    /// The front-end could not produce a tree, or traversal was aborted.
    Parse,
    /// The document could not be serialized or written.
    Output,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Lookup => "lookup",
            Self::Parse => "parse",
            Self::Output => "output",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Succeeded {
        file: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<PathBuf>,
        nodes: usize,
    },
    Failed {
        file: PathBuf,
        stage: FailureStage,
        error: String,
    },
}

impl FileOutcome {
    #[must_use]
    pub const fn file(&self) -> &PathBuf {
        match self {
            Self::Succeeded { file, .. } | Self::Failed { file, .. } => file,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Per-attribute omission counts, keyed `"<category>.<attribute>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OmissionSummary {
    pub not_applicable: BTreeMap<String, usize>,
    pub faults: BTreeMap<String, usize>,
}

impl OmissionSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.not_applicable.values().sum::<usize>() + self.faults.values().sum::<usize>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.not_applicable.is_empty() && self.faults.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub files: Vec<FileOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omissions: Option<OmissionSummary>,
}

impl BatchReport {
    pub fn record(&mut self, outcome: FileOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.files.push(outcome);
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
