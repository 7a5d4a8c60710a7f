//! The per-node record and its source location.

use std::collections::BTreeMap;
use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::attribute::Category;
use crate::errors::CoreError;
use crate::value::Value;

/// Attribute name to harvested value. Sorted so serialization is stable.
pub type AttributeMap = BTreeMap<String, Value>;

/// Where a node sits in the source. `file` is `None` for nodes the
/// front-end cannot place in any file (builtins, invalid locations).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub file: Option<PathBuf>,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: Some(file.into()),
            line,
            column,
        }
    }

    /// A location without a file.
    #[must_use]
    pub const fn nowhere() -> Self {
        Self {
            file: None,
            line: 0,
            column: 0,
        }
    }
}

/// One visited syntax node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NodeRecord {
    pub depth: usize,
    pub line: u32,
    pub column: u32,
    pub tokens: Vec<String>,
    pub kind_attributes: AttributeMap,
    pub node_attributes: AttributeMap,
    pub type_attributes: AttributeMap,
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    #[must_use]
    pub const fn attributes(&self, category: Category) -> &AttributeMap {
        match category {
            Category::Kind => &self.kind_attributes,
            Category::Node => &self.node_attributes,
            Category::Type => &self.type_attributes,
        }
    }

    pub fn attributes_mut(&mut self, category: Category) -> &mut AttributeMap {
        match category {
            Category::Kind => &mut self.kind_attributes,
            Category::Node => &mut self.node_attributes,
            Category::Type => &mut self.type_attributes,
        }
    }

    /// The kind's `name` property, e.g. `VAR_DECL`.
    #[must_use]
    pub fn kind_name(&self) -> Option<&str> {
        self.kind_attributes.get("name").and_then(Value::as_str)
    }

    /// The node's `spelling` property.
    #[must_use]
    pub fn spelling(&self) -> Option<&str> {
        self.node_attributes.get("spelling").and_then(Value::as_str)
    }

    /// The resolved type's `kind`, once normalized to a string.
    #[must_use]
    pub fn type_kind(&self) -> Option<&str> {
        self.type_attributes.get("kind").and_then(Value::as_str)
    }

    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// Pre-order iterator over this record and all of its descendants.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of records in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Verify every direct child sits exactly one level below its parent.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DepthMismatch` naming the first offending child by
    /// its index path from this record.
    pub fn check_depths(&self) -> Result<(), CoreError> {
        let mut stack: Vec<(&Self, String)> = vec![(self, String::from("root"))];
        while let Some((record, path)) = stack.pop() {
            for (index, child) in record.children.iter().enumerate() {
                let child_path = format!("{path}/{index}");
                if child.depth != record.depth + 1 {
                    return Err(CoreError::DepthMismatch {
                        path: child_path,
                        expected: record.depth + 1,
                        found: child.depth,
                    });
                }
                stack.push((child, child_path));
            }
        }
        Ok(())
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a NodeRecord>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a NodeRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.stack.pop()?;
        self.stack.extend(record.children.iter().rev());
        Some(record)
    }
}
