//! Capabilities of an entity (a libclang cursor).
//!
//! Names follow libclang's Python bindings so documents stay comparable
//! across tools; members only the `clang` crate offers keep its names.

use std::sync::OnceLock;

use clang::{Accessibility, Entity};
use cxtree_core::{Category, EnumMember, Flavor, Skip, Value};

use super::naming::{entity_kind_member, enum_member};
use super::{entity_snapshot, type_snapshot};
use crate::catalog::{Capability, Catalog};
use crate::harvest::Probe;

pub type EntityReader = for<'a, 'tu> fn(&'a Entity<'tu>) -> Probe;

fn check(name: &'static str, read: EntityReader) -> Capability<EntityReader> {
    Capability::new(name, Flavor::Check, read)
}

fn get(name: &'static str, read: EntityReader) -> Capability<EntityReader> {
    Capability::new(name, Flavor::Get, read)
}

fn property(name: &'static str, read: EntityReader) -> Capability<EntityReader> {
    Capability::new(name, Flavor::Property, read)
}

fn present<T>(value: Option<T>, into: impl FnOnce(T) -> Value) -> Probe {
    value.map(into).ok_or(Skip::NotApplicable)
}

fn entities(list: Option<Vec<Entity<'_>>>) -> Probe {
    present(list, |list| {
        Value::List(list.iter().map(|e| entity_snapshot(e).into()).collect())
    })
}

/// libclang reports `CX_CXXInvalidAccessSpecifier` for nodes without one.
fn access_specifier(accessibility: Option<Accessibility>) -> Value {
    accessibility.map_or_else(
        || EnumMember::new("INVALID", 0),
        |a| enum_member(a, a as i64),
    )
    .into()
}

#[allow(clippy::too_many_lines)]
fn table() -> Vec<Capability<EntityReader>> {
    vec![
        // Checks
        check("has_attributes", |e| Ok(e.has_attributes().into())),
        check("is_abstract_record", |e| Ok(e.is_abstract_record().into())),
        check("is_anonymous", |e| Ok(e.is_anonymous().into())),
        check("is_anonymous_record_decl", |e| {
            Ok(e.is_anonymous_record_decl().into())
        }),
        check("is_bitfield", |e| Ok(e.is_bit_field().into())),
        check("is_builtin_macro", |e| Ok(e.is_builtin_macro().into())),
        check("is_const_method", |e| Ok(e.is_const_method().into())),
        check("is_converting_constructor", |e| {
            Ok(e.is_converting_constructor().into())
        }),
        check("is_copy_constructor", |e| Ok(e.is_copy_constructor().into())),
        check("is_default_constructor", |e| {
            Ok(e.is_default_constructor().into())
        }),
        check("is_default_method", |e| Ok(e.is_defaulted().into())),
        check("is_definition", |e| Ok(e.is_definition().into())),
        check("is_dynamic_call", |e| Ok(e.is_dynamic_call().into())),
        check("is_function_like_macro", |e| {
            Ok(e.is_function_like_macro().into())
        }),
        check("is_inline_function", |e| Ok(e.is_inline_function().into())),
        check("is_inline_namespace", |e| Ok(e.is_inline_namespace().into())),
        check("is_invalid_declaration", |e| {
            Ok(e.is_invalid_declaration().into())
        }),
        check("is_move_constructor", |e| Ok(e.is_move_constructor().into())),
        check("is_mutable_field", |e| Ok(e.is_mutable().into())),
        check("is_pure_virtual_method", |e| {
            Ok(e.is_pure_virtual_method().into())
        }),
        check("is_scoped_enum", |e| Ok(e.is_scoped().into())),
        check("is_static_method", |e| Ok(e.is_static_method().into())),
        check("is_variadic", |e| Ok(e.is_variadic().into())),
        check("is_virtual_base", |e| Ok(e.is_virtual_base().into())),
        check("is_virtual_method", |e| Ok(e.is_virtual_method().into())),
        // Derived values
        get("get_arguments", |e| entities(e.get_arguments())),
        get("get_bitfield_width", |e| {
            present(e.get_bit_field_width(), Value::from)
        }),
        get("get_definition", |e| {
            present(e.get_definition(), |d| entity_snapshot(&d).into())
        }),
        get("get_included_file", |e| {
            present(e.get_file(), |f| f.get_path().display().to_string().into())
        }),
        get("get_num_template_arguments", |e| {
            present(e.get_template_arguments(), |args| args.len().into())
        }),
        get("get_overridden_methods", |e| {
            entities(e.get_overridden_methods())
        }),
        get("get_template", |e| {
            present(e.get_template(), |t| entity_snapshot(&t).into())
        }),
        get("get_template_kind", |e| {
            present(e.get_template_kind(), |k| entity_kind_member(k).into())
        }),
        get("get_usr", |e| present(e.get_usr(), |usr| usr.0.into())),
        // Properties
        property("access_specifier", |e| Ok(access_specifier(e.get_accessibility()))),
        property("availability", |e| {
            let availability = e.get_availability();
            Ok(enum_member(availability, availability as i64).into())
        }),
        property("brief_comment", |e| present(e.get_comment_brief(), Value::from)),
        property("canonical", |e| Ok(entity_snapshot(&e.get_canonical_entity()).into())),
        property("displayname", |e| {
            Ok(e.get_display_name().unwrap_or_default().into())
        }),
        property("enum_type", |e| {
            present(e.get_enum_underlying_type(), |t| type_snapshot(&t).into())
        }),
        property("enum_value", |e| {
            present(e.get_enum_constant_value(), |(signed, _)| signed.into())
        }),
        property("exception_specification_kind", |e| {
            present(e.get_exception_specification(), |x| enum_member(x, x as i64).into())
        }),
        property("kind", |e| Ok(entity_kind_member(e.get_kind()).into())),
        property("language", |e| {
            present(e.get_language(), |l| enum_member(l, l as i64).into())
        }),
        property("lexical_parent", |e| {
            present(e.get_lexical_parent(), |p| entity_snapshot(&p).into())
        }),
        property("linkage", |e| {
            present(e.get_linkage(), |l| enum_member(l, l as i64).into())
        }),
        property("mangled_name", |e| present(e.get_mangled_name(), Value::from)),
        property("raw_comment", |e| present(e.get_comment(), Value::from)),
        property("referenced", |e| {
            present(e.get_reference(), |r| entity_snapshot(&r).into())
        }),
        property("result_type", |e| {
            present(e.get_result_type(), |t| type_snapshot(&t).into())
        }),
        property("semantic_parent", |e| {
            present(e.get_semantic_parent(), |p| entity_snapshot(&p).into())
        }),
        property("spelling", |e| Ok(e.get_name().unwrap_or_default().into())),
        property("storage_class", |e| {
            present(e.get_storage_class(), |s| enum_member(s, s as i64).into())
        }),
        property("tls_kind", |e| {
            present(e.get_tls_kind(), |k| enum_member(k, k as i64).into())
        }),
        property("type", |e| present(e.get_type(), |t| type_snapshot(&t).into())),
        property("underlying_typedef_type", |e| {
            present(e.get_typedef_underlying_type(), |t| type_snapshot(&t).into())
        }),
        property("visibility", |e| {
            present(e.get_visibility(), |v| enum_member(v, v as i64).into())
        }),
    ]
}

pub fn catalog() -> &'static Catalog<EntityReader> {
    static CATALOG: OnceLock<Catalog<EntityReader>> = OnceLock::new();
    CATALOG.get_or_init(|| Catalog::from_table(Category::Node, table()))
}
