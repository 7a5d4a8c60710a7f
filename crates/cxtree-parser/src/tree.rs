//! Depth-first construction of the [`NodeRecord`] tree.
//!
//! Traversal uses an explicit work stack, so nesting depth never grows the
//! call stack; the configured maximum depth is enforced instead. Only
//! children located in the root's own file are visited.

use cxtree_core::{Location, NodeRecord};

use crate::error::ParserError;
use crate::harvest::{Introspect, harvest, harvest_invalid};
use crate::normalize::normalize_record;
use crate::omission::OmissionSink;

/// A node of a front-end syntax tree, as seen by the tree builder.
pub trait SyntaxNode: Introspect + Sized {
    type Kind: Introspect;
    type Type: Introspect;

    fn kind(&self) -> Self::Kind;

    /// The node's resolved type, if the front-end reports one. Nodes without
    /// one get the invalid-type view of the type catalog.
    fn resolved_type(&self) -> Option<Self::Type>;

    fn location(&self) -> Location;

    /// Spellings of the tokens the node spans, in source order.
    fn tokens(&self) -> Vec<String>;

    /// Children in the front-end's own traversal order.
    fn children(&self) -> Vec<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeBuilder {
    max_depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DEPTH)
    }
}

struct Frame<N> {
    record: NodeRecord,
    pending: std::vec::IntoIter<N>,
}

impl TreeBuilder {
    pub const DEFAULT_MAX_DEPTH: usize = 1024;

    #[must_use]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build the record tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// `DepthExceeded` when a kept node would sit deeper than `max_depth`.
    pub fn build<N: SyntaxNode>(
        &self,
        root: &N,
        sink: &mut dyn OmissionSink,
    ) -> Result<NodeRecord, ParserError> {
        let root_location = root.location();
        let root_file = root_location.file.clone();
        let mut root_frame = open(root, &root_location, 0, sink);
        let mut stack: Vec<Frame<N>> = Vec::new();
        let mut visited = 1usize;

        loop {
            let top = match stack.last_mut() {
                Some(frame) => frame,
                None => &mut root_frame,
            };
            let Some(child) = top.pending.next() else {
                match stack.pop() {
                    Some(frame) => stack
                        .last_mut()
                        .unwrap_or(&mut root_frame)
                        .record
                        .children
                        .push(frame.record),
                    None => break,
                }
                continue;
            };

            let location = child.location();
            if root_file.is_none() || location.file != root_file {
                continue;
            }
            let depth = stack.len() + 1;
            if depth > self.max_depth {
                return Err(ParserError::DepthExceeded {
                    limit: self.max_depth,
                    file: root_file.unwrap_or_default(),
                });
            }
            stack.push(open(&child, &location, depth, sink));
            visited += 1;
        }

        tracing::debug!(file = ?root_file, nodes = visited, "built record tree");
        Ok(root_frame.record)
    }
}

/// Harvest one node into a normalized record and queue its children.
fn open<N: SyntaxNode>(
    node: &N,
    location: &Location,
    depth: usize,
    sink: &mut dyn OmissionSink,
) -> Frame<N> {
    let mut record = NodeRecord {
        depth,
        line: location.line,
        column: location.column,
        tokens: node.tokens(),
        kind_attributes: harvest(&node.kind(), sink).into_attributes(),
        node_attributes: harvest(node, sink).into_attributes(),
        type_attributes: match node.resolved_type() {
            Some(ty) => harvest(&ty, sink),
            None => harvest_invalid(<N::Type as Introspect>::catalog(), sink),
        }
        .into_attributes(),
        children: Vec::new(),
    };
    normalize_record(&mut record);
    Frame {
        record,
        pending: node.children().into_iter(),
    }
}

#[cfg(test)]
mod tests {
    use cxtree_core::{EnumMember, Skip, TypeSnapshot, Value};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::memory::{MemoryNode, MemoryType};
    use crate::omission::{CollectOmissions, DiscardOmissions};

    const SOURCE: &str = "/src/widget.cpp";

    fn build(root: &MemoryNode) -> NodeRecord {
        TreeBuilder::default()
            .build(&root, &mut DiscardOmissions)
            .unwrap()
    }

    fn int() -> MemoryType {
        MemoryType::new("int").kind("INT", 17)
    }

    #[test]
    fn empty_unit_is_a_lone_root() {
        let record = build(&MemoryNode::unit(SOURCE));
        assert_eq!(record.depth, 0);
        assert_eq!((record.line, record.column), (0, 0));
        assert!(record.children.is_empty());
        assert!(record.tokens.is_empty());
        assert_eq!(record.type_kind(), Some("INVALID"));
        assert_eq!(record.kind_name(), Some("TRANSLATION_UNIT"));
        assert_eq!(record.spelling(), Some(SOURCE));
    }

    #[test]
    fn foreign_subtrees_are_left_out() {
        let root = MemoryNode::unit(SOURCE)
            .child(
                MemoryNode::new("NAMESPACE")
                    .at("/usr/include/c++/ostream", 40, 1)
                    .spelled("std")
                    .child(MemoryNode::new("CLASS_DECL").at(SOURCE, 1, 1)),
            )
            .child(MemoryNode::new("VAR_DECL").at(SOURCE, 3, 5).spelled("anInt"))
            .child(MemoryNode::new("MACRO_DEFINITION").spelled("__clang__"));

        let record = build(&root);
        assert_eq!(record.children.len(), 1);
        assert_eq!(record.children[0].spelling(), Some("anInt"));
        assert_eq!(record.node_count(), 2);
    }

    #[test]
    fn children_keep_front_end_order_and_depth() {
        let root = MemoryNode::unit(SOURCE).child(
            MemoryNode::new("STRUCT_DECL")
                .at(SOURCE, 1, 8)
                .spelled("AStruct")
                .child(MemoryNode::new("FIELD_DECL").at(SOURCE, 2, 9).spelled("b"))
                .child(MemoryNode::new("FIELD_DECL").at(SOURCE, 3, 9).spelled("a"))
                .child(
                    MemoryNode::new("CXX_METHOD")
                        .at(SOURCE, 4, 10)
                        .spelled("run")
                        .child(MemoryNode::new("COMPOUND_STMT").at(SOURCE, 4, 20)),
                ),
        );

        let record = build(&root);
        record.check_depths().unwrap();
        let spellings: Vec<_> = record.walk().filter_map(NodeRecord::spelling).collect();
        assert_eq!(spellings, vec![SOURCE, "AStruct", "b", "a", "run"]);
        let body = record.child(0).and_then(|s| s.child(2)).and_then(|m| m.child(0));
        assert_eq!(body.map(|b| b.depth), Some(3));
    }

    #[test]
    fn snapshot_keys_are_normalized() {
        let root = MemoryNode::unit(SOURCE)
            .child(
                MemoryNode::new("VAR_DECL")
                    .at(SOURCE, 1, 5)
                    .tokens(["int", "anInt"])
                    .spelled("anInt")
                    .typed(int()),
            )
            .child(
                MemoryNode::new("CONSTRUCTOR")
                    .at(SOURCE, 2, 3)
                    .spelled("AStruct")
                    .with("access_specifier", EnumMember::new("PUBLIC", 1))
                    .with("result_type", TypeSnapshot {
                        spelling: "void".into(),
                        type_kind: "VOID".into(),
                    }),
            );

        let record = build(&root);
        let var = &record.children[0];
        assert_eq!(var.kind_name(), Some("VAR_DECL"));
        assert_eq!(var.type_kind(), Some("INT"));
        assert_eq!(var.type_attributes["spelling"], Value::from("int"));
        assert_eq!(var.tokens, vec!["int", "anInt"]);
        assert_eq!((var.line, var.column), (1, 5));

        let constructor = &record.children[1];
        assert_eq!(constructor.node_attributes["access_specifier"], Value::from("PUBLIC"));
        assert_eq!(constructor.node_attributes["result_type"], Value::from("void"));
    }

    #[test]
    fn parameters_carry_their_own_types() {
        let root = MemoryNode::unit(SOURCE).child(
            MemoryNode::new("FUNCTION_DECL")
                .at(SOURCE, 1, 5)
                .spelled("aFunction")
                .with("result_type", int().snapshot())
                .child(MemoryNode::new("PARM_DECL").at(SOURCE, 1, 19).spelled("x").typed(int()))
                .child(
                    MemoryNode::new("PARM_DECL")
                        .at(SOURCE, 1, 29)
                        .spelled("y")
                        .typed(MemoryType::new("double").kind("DOUBLE", 22)),
                ),
        );

        let function = &build(&root).children[0];
        assert_eq!(function.node_attributes["result_type"], Value::from("int"));
        let kinds: Vec<_> = function.children.iter().filter_map(NodeRecord::type_kind).collect();
        assert_eq!(kinds, vec!["INT", "DOUBLE"]);
    }

    #[test]
    fn nested_anonymous_records_keep_empty_spellings() {
        let anonymous = |kind: &str, line: u32| {
            MemoryNode::new(kind)
                .at(SOURCE, line, 5)
                .spelled("")
                .with("is_anonymous", true)
        };
        let root = MemoryNode::unit(SOURCE).child(
            anonymous("UNION_DECL", 1)
                .child(anonymous("STRUCT_DECL", 2).child(anonymous("ENUM_DECL", 3))),
        );

        let record = build(&root);
        let union = &record.children[0];
        let chain = [union, &union.children[0], &union.children[0].children[0]];
        let kinds: Vec<_> = chain.iter().filter_map(|r| r.kind_name()).collect();
        assert_eq!(kinds, vec!["UNION_DECL", "STRUCT_DECL", "ENUM_DECL"]);
        for (depth, decl) in (1..).zip(chain) {
            assert_eq!(decl.depth, depth);
            assert_eq!(decl.spelling(), Some(""));
            assert_eq!(decl.node_attributes["is_anonymous"], Value::Bool(true));
        }
    }

    #[test]
    fn failing_members_are_omitted_and_reported() {
        let root = MemoryNode::unit(SOURCE).child(
            MemoryNode::new("VAR_DECL")
                .at(SOURCE, 1, 5)
                .spelled("anInt")
                .faulting("get_usr", "no USR")
                .panicking("get_definition", "null cursor")
                .typed(int()),
        );

        let mut sink = CollectOmissions::with_faults();
        let record = TreeBuilder::default().build(&&root, &mut sink).unwrap();
        let var = &record.children[0];
        assert!(!var.node_attributes.contains_key("get_usr"));
        assert!(!var.node_attributes.contains_key("get_definition"));
        assert_eq!(var.spelling(), Some("anInt"));

        let faults: Vec<_> = sink.faults().iter().map(|o| (o.key(), o.skip.clone())).collect();
        assert_eq!(
            faults,
            vec![
                ("node.get_definition".to_string(), Skip::Fault("null cursor".into())),
                ("node.get_usr".to_string(), Skip::Fault("no USR".into())),
            ]
        );
    }

    #[test]
    fn denied_members_never_appear() {
        let root = MemoryNode::unit(SOURCE).with("tokens", "poison").with("children", "poison");
        let record = build(&root);
        assert!(!record.node_attributes.contains_key("tokens"));
        assert!(!record.node_attributes.contains_key("children"));
    }

    #[test]
    fn depth_beyond_the_limit_is_an_error() {
        let root = MemoryNode::unit(SOURCE).child(
            MemoryNode::new("NAMESPACE")
                .at(SOURCE, 1, 1)
                .child(MemoryNode::new("NAMESPACE").at(SOURCE, 2, 1)),
        );

        let err = TreeBuilder::new(1).build(&&root, &mut DiscardOmissions).unwrap_err();
        assert!(matches!(err, ParserError::DepthExceeded { limit: 1, .. }));
        assert!(TreeBuilder::new(2).build(&&root, &mut DiscardOmissions).is_ok());
    }

    #[test]
    fn root_without_a_file_keeps_no_children() {
        let root = MemoryNode::new("TRANSLATION_UNIT").child(MemoryNode::new("VAR_DECL"));
        let record = build(&root);
        assert!(record.children.is_empty());
    }
}
