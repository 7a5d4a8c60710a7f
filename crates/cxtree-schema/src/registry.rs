//! Schema registry for the cxtree output types.

use std::collections::HashMap;

use cxtree_core::{BatchReport, FileOutcome, NodeRecord, OmissionSummary};
use schemars::schema_for;

use crate::error::SchemaError;

/// Named JSON Schemas, built once from the `cxtree-core` types.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty))
                .map_err(|e| SchemaError::Generation(format!("{}: {e}", $name)))?,
        );
    };
}

impl SchemaRegistry {
    /// Schema of one serialized record tree.
    pub const NODE_RECORD: &'static str = "node_record";

    /// Schema of the summary `cxtree parse` prints.
    pub const BATCH_REPORT: &'static str = "batch_report";

    /// # Errors
    ///
    /// `Generation` if a generated schema cannot be turned into JSON.
    pub fn new() -> Result<Self, SchemaError> {
        let mut schemas = HashMap::new();
        register!(schemas, Self::NODE_RECORD, NodeRecord);
        register!(schemas, Self::BATCH_REPORT, BatchReport);
        register!(schemas, "file_outcome", FileOutcome);
        register!(schemas, "omission_summary", OmissionSummary);
        Ok(Self { schemas })
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
