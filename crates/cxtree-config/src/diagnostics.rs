//! Diagnostics collected alongside batch runs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiagnosticsConfig {
    /// Count omitted attributes per reason and add them to the batch report.
    #[serde(default)]
    pub record_omissions: bool,
}
