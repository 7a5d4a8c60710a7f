//! Harvester vocabulary: which foreign object an attribute came from, what
//! flavor of member produced it, and why a member produced nothing.

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The three foreign object categories introspected for every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// The node-kind descriptor.
    Kind,
    /// The node instance itself.
    Node,
    /// The node's resolved type.
    Type,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Kind, Self::Node, Self::Type];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Node => "node",
            Self::Type => "type",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kind" => Ok(Self::Kind),
            "node" | "cursor" => Ok(Self::Node),
            "type" => Ok(Self::Type),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}

/// How a member is exposed by the foreign object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// Zero-argument boolean predicate (`is_*`, `has_*`).
    Check,
    /// Zero-argument accessor deriving a value (`get_*`).
    Get,
    /// Read-only attribute.
    Property,
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Check => "check",
            Self::Get => "get",
            Self::Property => "property",
        };
        write!(f, "{s}")
    }
}

/// Why a single attribute produced no value for a given instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Skip {
    /// The member has no answer for this particular instance.
    NotApplicable,
    /// The front-end faulted (reported an internal error or panicked).
    Fault(String),
}

impl Skip {
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }
}

impl std::fmt::Display for Skip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotApplicable => f.write_str("not applicable"),
            Self::Fault(detail) => write!(f, "fault: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("kind", Category::Kind)]
    #[case("KIND", Category::Kind)]
    #[case("node", Category::Node)]
    #[case("cursor", Category::Node)]
    #[case("Type", Category::Type)]
    fn category_parses_case_insensitively(#[case] input: &str, #[case] expected: Category) {
        assert_eq!(input.parse::<Category>().unwrap(), expected);
    }

    #[test]
    fn category_rejects_unknown() {
        let err = "token".parse::<Category>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownCategory(name) if name == "token"));
    }

    #[test]
    fn skip_serializes_with_reason_tag() {
        let json = serde_json::to_value(Skip::Fault("boom".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "reason": "fault", "detail": "boom" }));

        let json = serde_json::to_value(Skip::NotApplicable).unwrap();
        assert_eq!(json, serde_json::json!({ "reason": "not_applicable" }));
    }
}
