//! A scripted, in-memory front-end.
//!
//! Nodes, kinds and types are plain values whose attribute answers are set
//! up front, including answers that fault or panic. This drives the whole
//! engine (harvesting, file scoping, ordering, normalization, batch
//! handling) without loading libclang.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use cxtree_core::{Category, EnumMember, Flavor, Location, NodeRecord, Skip, TypeSnapshot, Value};

use crate::catalog::{Capability, Catalog};
use crate::error::ParserError;
use crate::frontend::Frontend;
use crate::harvest::{Introspect, Probe};
use crate::omission::OmissionSink;
use crate::tree::{SyntaxNode, TreeBuilder};

/// What a scripted member does when invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Value(Value),
    NotApplicable,
    Fault(String),
    Panic(String),
}

/// Scripted answers by attribute name. Unscripted members are not applicable.
pub type Facets = BTreeMap<String, Answer>;

fn answer(facets: &Facets, name: &str) -> Probe {
    match facets.get(name) {
        Some(Answer::Value(value)) => Ok(value.clone()),
        Some(Answer::Fault(detail)) => Err(Skip::Fault(detail.clone())),
        Some(Answer::Panic(message)) => std::panic::panic_any(message.clone()),
        Some(Answer::NotApplicable) | None => Err(Skip::NotApplicable),
    }
}

fn catalog_of(category: Category, table: &[(&'static str, Flavor)]) -> Catalog<()> {
    Catalog::from_table(
        category,
        table
            .iter()
            .map(|&(name, flavor)| Capability::new(name, flavor, ()))
            .collect(),
    )
}

// ── Kind ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryKind {
    facets: Facets,
}

impl MemoryKind {
    /// A kind called `name`, with its category checks derived from the
    /// usual suffixes (`_DECL`, `_EXPR`, `_REF`, `_STMT`).
    #[must_use]
    pub fn named(name: &str) -> Self {
        let checks = [
            ("is_declaration", name.ends_with("_DECL")),
            ("is_expression", name.ends_with("_EXPR")),
            ("is_reference", name.ends_with("_REF")),
            ("is_statement", name.ends_with("_STMT")),
            ("is_translation_unit", name == "TRANSLATION_UNIT"),
        ];
        let mut facets: Facets = checks
            .into_iter()
            .map(|(check, answer)| (check.to_string(), Answer::Value(Value::Bool(answer))))
            .collect();
        facets.insert("name".into(), Answer::Value(Value::from(name)));
        Self { facets }
    }
}

impl Introspect for MemoryKind {
    type Reader = ();

    fn catalog() -> &'static Catalog<()> {
        static CATALOG: OnceLock<Catalog<()>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            catalog_of(
                Category::Kind,
                &[
                    ("is_declaration", Flavor::Check),
                    ("is_expression", Flavor::Check),
                    ("is_reference", Flavor::Check),
                    ("is_statement", Flavor::Check),
                    ("is_translation_unit", Flavor::Check),
                    ("name", Flavor::Property),
                ],
            )
        })
    }

    fn invoke(&self, capability: &Capability<()>) -> Probe {
        answer(&self.facets, capability.name)
    }
}

// ── Type ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryType {
    facets: Facets,
}

impl MemoryType {
    #[must_use]
    pub fn new(spelling: &str) -> Self {
        let mut facets = Facets::new();
        facets.insert("spelling".into(), Answer::Value(Value::from(spelling)));
        Self { facets }
    }

    /// Set the `kind` property to an enumeration member, as a real
    /// front-end reports it before normalization.
    #[must_use]
    pub fn kind(self, name: &str, value: i64) -> Self {
        self.with("kind", EnumMember::new(name, value))
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.facets.insert(name.into(), Answer::Value(value.into()));
        self
    }

    #[must_use]
    pub fn answering(mut self, name: &str, answer: Answer) -> Self {
        self.facets.insert(name.into(), answer);
        self
    }

    /// The snapshot other nodes embed when they refer to this type.
    #[must_use]
    pub fn snapshot(&self) -> TypeSnapshot {
        let text = |key: &str| match self.facets.get(key) {
            Some(Answer::Value(Value::Str(s))) => s.clone(),
            Some(Answer::Value(Value::Enum(member))) => member.name.clone(),
            _ => String::new(),
        };
        TypeSnapshot {
            spelling: text("spelling"),
            type_kind: text("kind"),
        }
    }
}

impl Introspect for MemoryType {
    type Reader = ();

    fn catalog() -> &'static Catalog<()> {
        static CATALOG: OnceLock<Catalog<()>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            catalog_of(
                Category::Type,
                &[
                    ("is_const_qualified", Flavor::Check),
                    ("is_pod", Flavor::Check),
                    ("get_canonical", Flavor::Get),
                    ("get_size", Flavor::Get),
                    ("kind", Flavor::Property),
                    ("spelling", Flavor::Property),
                ],
            )
        })
    }

    fn invoke(&self, capability: &Capability<()>) -> Probe {
        answer(&self.facets, capability.name)
    }
}

// ── Node ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNode {
    kind: MemoryKind,
    location: Location,
    tokens: Vec<String>,
    facets: Facets,
    ty: Option<MemoryType>,
    children: Vec<MemoryNode>,
}

impl MemoryNode {
    /// A node of kind `kind_name` with no location, tokens or type.
    #[must_use]
    pub fn new(kind_name: &str) -> Self {
        Self {
            kind: MemoryKind::named(kind_name),
            location: Location::nowhere(),
            tokens: Vec::new(),
            facets: Facets::new(),
            ty: None,
            children: Vec::new(),
        }
    }

    /// A translation unit rooted at `path`: spelled as the path, located in
    /// it at line and column 0.
    #[must_use]
    pub fn unit(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::new("TRANSLATION_UNIT")
            .at(path, 0, 0)
            .spelled(&path.display().to_string())
    }

    #[must_use]
    pub fn at(mut self, file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        self.location = Location::new(file, line, column);
        self
    }

    #[must_use]
    pub fn tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Set `spelling` and `displayname` to `name`.
    #[must_use]
    pub fn spelled(self, name: &str) -> Self {
        self.with("spelling", name).with("displayname", name)
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.facets.insert(name.into(), Answer::Value(value.into()));
        self
    }

    /// Make `name` report a front-end fault.
    #[must_use]
    pub fn faulting(mut self, name: &str, detail: &str) -> Self {
        self.facets.insert(name.into(), Answer::Fault(detail.into()));
        self
    }

    /// Make `name` panic when invoked.
    #[must_use]
    pub fn panicking(mut self, name: &str, message: &str) -> Self {
        self.facets.insert(name.into(), Answer::Panic(message.into()));
        self
    }

    #[must_use]
    pub fn typed(mut self, ty: MemoryType) -> Self {
        self.ty = Some(ty);
        self
    }

    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

impl Introspect for MemoryNode {
    type Reader = ();

    fn catalog() -> &'static Catalog<()> {
        static CATALOG: OnceLock<Catalog<()>> = OnceLock::new();
        CATALOG.get_or_init(|| {
            catalog_of(
                Category::Node,
                &[
                    ("is_anonymous", Flavor::Check),
                    ("is_definition", Flavor::Check),
                    ("is_default_constructor", Flavor::Check),
                    ("get_definition", Flavor::Get),
                    ("get_usr", Flavor::Get),
                    ("access_specifier", Flavor::Property),
                    ("children", Flavor::Property),
                    ("displayname", Flavor::Property),
                    ("result_type", Flavor::Property),
                    ("spelling", Flavor::Property),
                    ("tokens", Flavor::Property),
                ],
            )
        })
    }

    fn invoke(&self, capability: &Capability<()>) -> Probe {
        answer(&self.facets, capability.name)
    }
}

impl<'a> SyntaxNode for &'a MemoryNode {
    type Kind = &'a MemoryKind;
    type Type = &'a MemoryType;

    fn kind(&self) -> &'a MemoryKind {
        let node: &'a MemoryNode = *self;
        &node.kind
    }

    fn resolved_type(&self) -> Option<&'a MemoryType> {
        let node: &'a MemoryNode = *self;
        node.ty.as_ref()
    }

    fn location(&self) -> Location {
        self.location.clone()
    }

    fn tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }

    fn children(&self) -> Vec<Self> {
        let node: &'a MemoryNode = *self;
        node.children.iter().collect()
    }
}

// ── Front-end ──────────────────────────────────────────────────────

/// Serves registered in-memory units by path and remembers every request.
#[derive(Debug, Default)]
pub struct MemoryFrontend {
    units: HashMap<PathBuf, MemoryNode>,
    builder: TreeBuilder,
    calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
}

impl MemoryFrontend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.builder = TreeBuilder::new(max_depth);
        self
    }

    /// Register `root` as the tree produced for `path`.
    #[must_use]
    pub fn unit(mut self, path: impl Into<PathBuf>, root: MemoryNode) -> Self {
        self.insert(path, root);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, root: MemoryNode) {
        self.units.insert(path.into(), root);
    }

    /// Every `(source, arguments)` pair `parse` was called with.
    #[must_use]
    pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.borrow().clone()
    }
}

impl Frontend for MemoryFrontend {
    fn parse(
        &self,
        source: &Path,
        arguments: &[String],
        sink: &mut dyn OmissionSink,
    ) -> Result<NodeRecord, ParserError> {
        self.calls
            .borrow_mut()
            .push((source.to_path_buf(), arguments.to_vec()));
        let root = self
            .units
            .get(source)
            .ok_or_else(|| ParserError::ParseFailed {
                file: source.to_path_buf(),
                reason: "no in-memory unit registered for this path".into(),
            })?;
        self.builder.build(&root, sink)
    }
}
