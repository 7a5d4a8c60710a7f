//! Capabilities of a resolved type.

use std::sync::OnceLock;

use clang::{Entity, Type};
use cxtree_core::{Category, Flavor, Skip, Value};

use super::naming::{enum_member, type_kind_member};
use super::{entity_snapshot, type_snapshot};
use crate::catalog::{Capability, Catalog};
use crate::harvest::Probe;

pub type TypeReader = for<'a, 'tu> fn(&'a Type<'tu>) -> Probe;

fn check(name: &'static str, read: TypeReader) -> Capability<TypeReader> {
    Capability::new(name, Flavor::Check, read)
}

fn get(name: &'static str, read: TypeReader) -> Capability<TypeReader> {
    Capability::new(name, Flavor::Get, read)
}

fn property(name: &'static str, read: TypeReader) -> Capability<TypeReader> {
    Capability::new(name, Flavor::Property, read)
}

fn nested(ty: Option<Type<'_>>) -> Probe {
    ty.map(|t| type_snapshot(&t).into())
        .ok_or(Skip::NotApplicable)
}

fn entities(list: Option<Vec<Entity<'_>>>) -> Probe {
    list.map(|list| Value::List(list.iter().map(|e| entity_snapshot(e).into()).collect()))
        .ok_or(Skip::NotApplicable)
}

fn table() -> Vec<Capability<TypeReader>> {
    vec![
        check("is_const_qualified", |t| Ok(t.is_const_qualified().into())),
        check("is_function_variadic", |t| Ok(t.is_variadic().into())),
        check("is_pod", |t| Ok(t.is_pod().into())),
        check("is_restrict_qualified", |t| Ok(t.is_restrict_qualified().into())),
        check("is_volatile_qualified", |t| Ok(t.is_volatile_qualified().into())),
        // libclang answers layout queries with an error code for incomplete,
        // dependent and invalid types.
        get("get_align", |t| {
            t.get_alignof().map(Value::from).map_err(|_| Skip::NotApplicable)
        }),
        get("get_argument_types", |t| {
            t.get_argument_types()
                .map(|types| Value::List(types.iter().map(|a| type_snapshot(a).into()).collect()))
                .ok_or(Skip::NotApplicable)
        }),
        get("get_array_element_type", |t| nested(t.get_element_type())),
        get("get_array_size", |t| {
            t.get_size().map(Value::from).ok_or(Skip::NotApplicable)
        }),
        get("get_calling_convention", |t| {
            t.get_calling_convention()
                .map(|c| enum_member(c, c as i64).into())
                .ok_or(Skip::NotApplicable)
        }),
        get("get_canonical", |t| Ok(type_snapshot(&t.get_canonical_type()).into())),
        get("get_class_type", |t| nested(t.get_class_type())),
        get("get_declaration", |t| {
            t.get_declaration()
                .map(|d| entity_snapshot(&d).into())
                .ok_or(Skip::NotApplicable)
        }),
        get("get_fields", |t| entities(t.get_fields())),
        get("get_named_type", |t| nested(t.get_elaborated_type())),
        get("get_pointee", |t| nested(t.get_pointee_type())),
        get("get_ref_qualifier", |t| {
            t.get_ref_qualifier()
                .map(|q| enum_member(q, q as i64).into())
                .ok_or(Skip::NotApplicable)
        }),
        get("get_result", |t| nested(t.get_result_type())),
        get("get_size", |t| {
            t.get_sizeof().map(Value::from).map_err(|_| Skip::NotApplicable)
        }),
        get("get_typedef_name", |t| {
            t.get_typedef_name().map(Value::from).ok_or(Skip::NotApplicable)
        }),
        property("element_count", |t| {
            t.get_size().map(Value::from).ok_or(Skip::NotApplicable)
        }),
        property("element_type", |t| nested(t.get_element_type())),
        property("kind", |t| Ok(type_kind_member(t.get_kind()).into())),
        property("spelling", |t| Ok(t.get_display_name().into())),
    ]
}

pub fn catalog() -> &'static Catalog<TypeReader> {
    static CATALOG: OnceLock<Catalog<TypeReader>> = OnceLock::new();
    CATALOG.get_or_init(|| Catalog::from_table(Category::Type, table()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_spelling_are_properties() {
        let listing = catalog().listing();
        assert!(listing.properties.contains(&"kind"));
        assert!(listing.properties.contains(&"spelling"));
        assert!(listing.derived.contains(&"get_size"));
    }

    #[test]
    fn checks_are_sorted() {
        let names = catalog().listing().checks;
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
