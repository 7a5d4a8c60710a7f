//! Rewrites the few harvested values that are snapshots into plain strings.
//!
//! Exactly three keys are touched, each by its own rule. A rule only fires
//! when the value still has the snapshot shape, so running the normalizer
//! twice changes nothing the second time.

use cxtree_core::{Category, NodeRecord, Value};

struct Rule {
    category: Category,
    key: &'static str,
    rewrite: fn(&Value) -> Option<Value>,
}

const RULES: [Rule; 3] = [
    Rule {
        category: Category::Node,
        key: "result_type",
        rewrite: type_spelling,
    },
    Rule {
        category: Category::Node,
        key: "access_specifier",
        rewrite: enum_name,
    },
    Rule {
        category: Category::Type,
        key: "kind",
        rewrite: enum_name,
    },
];

fn type_spelling(value: &Value) -> Option<Value> {
    match value {
        Value::Type(snapshot) => Some(Value::Str(snapshot.spelling.clone())),
        _ => None,
    }
}

fn enum_name(value: &Value) -> Option<Value> {
    match value {
        Value::Enum(member) => Some(Value::Str(member.name.clone())),
        _ => None,
    }
}

/// Apply the rules to one record, leaving its children alone.
pub fn normalize_record(record: &mut NodeRecord) {
    for rule in &RULES {
        if let Some(value) = record.attributes_mut(rule.category).get_mut(rule.key) {
            if let Some(rewritten) = (rule.rewrite)(value) {
                *value = rewritten;
            }
        }
    }
}

/// Apply the rules to every record of the tree.
pub fn normalize(root: &mut NodeRecord) {
    let mut stack = vec![root];
    while let Some(record) = stack.pop() {
        normalize_record(record);
        stack.extend(record.children.iter_mut());
    }
}

#[cfg(test)]
mod tests {
    use cxtree_core::{EntitySnapshot, EnumMember, TypeSnapshot};
    use pretty_assertions::assert_eq;

    use super::*;

    fn raw_record() -> NodeRecord {
        let mut record = NodeRecord::default();
        record.node_attributes.insert(
            "result_type".into(),
            Value::from(TypeSnapshot {
                spelling: "int".into(),
                type_kind: "INT".into(),
            }),
        );
        record.node_attributes.insert(
            "access_specifier".into(),
            Value::from(EnumMember::new("PUBLIC", 1)),
        );
        record
            .node_attributes
            .insert("availability".into(), Value::from(EnumMember::new("AVAILABLE", 0)));
        record
            .type_attributes
            .insert("kind".into(), Value::from(EnumMember::new("DOUBLE", 22)));
        record.type_attributes.insert(
            "get_declaration".into(),
            Value::from(EntitySnapshot {
                cursor_kind: "STRUCT_DECL".into(),
                spelling: "S".into(),
            }),
        );
        record
    }

    #[test]
    fn rewrites_the_three_known_keys() {
        let mut record = raw_record();
        normalize_record(&mut record);
        assert_eq!(record.node_attributes["result_type"], Value::from("int"));
        assert_eq!(record.node_attributes["access_specifier"], Value::from("PUBLIC"));
        assert_eq!(record.type_attributes["kind"], Value::from("DOUBLE"));
    }

    #[test]
    fn leaves_every_other_key_untouched() {
        let mut record = raw_record();
        normalize_record(&mut record);
        assert_eq!(
            record.node_attributes["availability"],
            Value::from(EnumMember::new("AVAILABLE", 0))
        );
        assert!(matches!(
            record.type_attributes["get_declaration"],
            Value::Entity(_)
        ));
    }

    #[test]
    fn is_idempotent() {
        let mut once = raw_record();
        normalize(&mut once);
        let mut twice = once.clone();
        normalize(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn walks_every_descendant() {
        let mut root = raw_record();
        let mut child = raw_record();
        child.depth = 1;
        let mut grandchild = raw_record();
        grandchild.depth = 2;
        child.children.push(grandchild);
        root.children.push(child);

        normalize(&mut root);
        assert!(root.walk().all(|r| r.type_kind() == Some("DOUBLE")));
    }

    #[test]
    fn missing_keys_are_not_invented() {
        let mut record = NodeRecord::default();
        normalize(&mut record);
        assert!(record.node_attributes.is_empty());
        assert!(record.type_attributes.is_empty());
    }
}
