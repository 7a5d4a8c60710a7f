//! libclang front-end, through the `clang` crate with libclang loaded at
//! runtime.
//!
//! The capability tables are written against the libclang 10 API surface.
//! Only one `clang::Clang` may exist per process, so every parse holds
//! [`CLANG_LOCK`] for its whole duration.

pub mod entity_table;
pub mod kind_table;
pub mod naming;
pub mod type_table;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use clang::{Clang, Entity, EntityKind, Index, Type};
use cxtree_core::{Category, EntitySnapshot, Location, NodeRecord, TypeSnapshot};

use self::entity_table::EntityReader;
use self::kind_table::KindReader;
use self::naming::{entity_kind_name, type_kind_name};
use self::type_table::TypeReader;
use super::{Frontend, ParseOptions};
use crate::catalog::{Capability, Catalog, CatalogListing};
use crate::error::ParserError;
use crate::harvest::{Introspect, Probe};
use crate::omission::OmissionSink;
use crate::tree::SyntaxNode;

static CLANG_LOCK: Mutex<()> = Mutex::new(());

/// Whether libclang can be loaded in this process.
#[must_use]
pub fn is_available() -> bool {
    let _guard = CLANG_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    Clang::new().is_ok()
}

/// Member names of the active catalog for `category`.
#[must_use]
pub fn catalog_listing(category: Category) -> CatalogListing {
    match category {
        Category::Kind => kind_table::catalog().listing(),
        Category::Node => entity_table::catalog().listing(),
        Category::Type => type_table::catalog().listing(),
    }
}

pub(crate) fn entity_snapshot(entity: &Entity<'_>) -> EntitySnapshot {
    EntitySnapshot {
        cursor_kind: entity_kind_name(entity.get_kind()),
        spelling: entity.get_name().unwrap_or_default(),
    }
}

pub(crate) fn type_snapshot(ty: &Type<'_>) -> TypeSnapshot {
    TypeSnapshot {
        spelling: ty.get_display_name(),
        type_kind: type_kind_name(ty.get_kind()),
    }
}

// ── Introspection ──────────────────────────────────────────────────

impl Introspect for EntityKind {
    type Reader = KindReader;

    fn catalog() -> &'static Catalog<KindReader> {
        kind_table::catalog()
    }

    fn invoke(&self, capability: &Capability<KindReader>) -> Probe {
        (capability.read)(*self)
    }
}

impl Introspect for Entity<'_> {
    type Reader = EntityReader;

    fn catalog() -> &'static Catalog<EntityReader> {
        entity_table::catalog()
    }

    fn invoke(&self, capability: &Capability<EntityReader>) -> Probe {
        (capability.read)(self)
    }
}

impl Introspect for Type<'_> {
    type Reader = TypeReader;

    fn catalog() -> &'static Catalog<TypeReader> {
        type_table::catalog()
    }

    fn invoke(&self, capability: &Capability<TypeReader>) -> Probe {
        (capability.read)(self)
    }
}

impl<'tu> SyntaxNode for Entity<'tu> {
    type Kind = EntityKind;
    type Type = Type<'tu>;

    fn kind(&self) -> EntityKind {
        self.get_kind()
    }

    fn resolved_type(&self) -> Option<Type<'tu>> {
        self.get_type()
    }

    /// The unit itself has no source position; it is placed in its own
    /// file at line and column 0 so that file scoping has a root file.
    fn location(&self) -> Location {
        if self.get_kind() == EntityKind::TranslationUnit {
            return Location::new(PathBuf::from(self.get_name().unwrap_or_default()), 0, 0);
        }
        self.get_location()
            .map(|location| location.get_expansion_location())
            .map_or_else(Location::nowhere, |expansion| Location {
                file: expansion.file.map(|file| file.get_path()),
                line: expansion.line,
                column: expansion.column,
            })
    }

    fn tokens(&self) -> Vec<String> {
        self.get_range()
            .map(|range| range.tokenize().iter().map(|t| t.get_spelling()).collect())
            .unwrap_or_default()
    }

    fn children(&self) -> Vec<Self> {
        self.get_children()
    }
}

// ── Front-end ──────────────────────────────────────────────────────

/// Parses with libclang and builds the record tree from the unit's entity.
#[derive(Debug, Clone, Default)]
pub struct ClangFrontend {
    options: ParseOptions,
}

impl ClangFrontend {
    #[must_use]
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }
}

impl Frontend for ClangFrontend {
    fn parse(
        &self,
        source: &Path,
        arguments: &[String],
        sink: &mut dyn OmissionSink,
    ) -> Result<NodeRecord, ParserError> {
        let _guard = CLANG_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let clang = Clang::new().map_err(ParserError::FrontendUnavailable)?;
        let index = Index::new(&clang, false, false);
        let arguments = self.options.arguments(arguments);

        tracing::debug!(file = %source.display(), ?arguments, "parsing");
        let unit = index
            .parser(source)
            .arguments(&arguments)
            .detailed_preprocessing_record(self.options.detailed_preprocessing_record)
            .skip_function_bodies(self.options.skip_function_bodies)
            .parse()
            .map_err(|err| ParserError::ParseFailed {
                file: source.to_path_buf(),
                reason: format!("{err:?}"),
            })?;
        tracing::debug!(
            file = %source.display(),
            diagnostics = unit.get_diagnostics().len(),
            "parsed"
        );

        self.options.tree_builder().build(&unit.get_entity(), sink)
    }
}
