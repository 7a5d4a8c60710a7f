//! Capabilities of an entity kind.
//!
//! Kind categories follow libclang's numeric ranges (`clang_isDeclaration`
//! and friends), which the `clang` crate does not expose on `EntityKind`.

use std::ops::RangeInclusive;
use std::sync::OnceLock;

use clang::EntityKind;
use cxtree_core::{Category, Flavor, Value};

use super::naming::entity_kind_name;
use crate::catalog::{Capability, Catalog};
use crate::harvest::Probe;

pub type KindReader = fn(EntityKind) -> Probe;

const DECLARATIONS: [RangeInclusive<i64>; 2] = [1..=39, 600..=699];
const REFERENCES: RangeInclusive<i64> = 40..=51;
const INVALID: RangeInclusive<i64> = 70..=73;
const EXPRESSIONS: RangeInclusive<i64> = 100..=199;
const STATEMENTS: RangeInclusive<i64> = 200..=299;
const TRANSLATION_UNIT: i64 = 300;
const ATTRIBUTES: RangeInclusive<i64> = 400..=499;
const PREPROCESSING: RangeInclusive<i64> = 500..=503;
const UNEXPOSED: [i64; 4] = [1, 100, 200, 400];

fn check(name: &'static str, test: KindReader) -> Capability<KindReader> {
    Capability::new(name, Flavor::Check, test)
}

fn property(name: &'static str, read: KindReader) -> Capability<KindReader> {
    Capability::new(name, Flavor::Property, read)
}

const fn value(kind: EntityKind) -> i64 {
    kind as i64
}

fn within(kind: EntityKind, range: &RangeInclusive<i64>) -> Probe {
    Ok(Value::Bool(range.contains(&value(kind))))
}

fn table() -> Vec<Capability<KindReader>> {
    vec![
        check("is_attribute", |k| within(k, &ATTRIBUTES)),
        check("is_declaration", |k| {
            Ok(Value::Bool(DECLARATIONS.iter().any(|r| r.contains(&value(k)))))
        }),
        check("is_expression", |k| within(k, &EXPRESSIONS)),
        check("is_invalid", |k| within(k, &INVALID)),
        check("is_preprocessing", |k| within(k, &PREPROCESSING)),
        check("is_reference", |k| within(k, &REFERENCES)),
        check("is_statement", |k| within(k, &STATEMENTS)),
        check("is_translation_unit", |k| {
            Ok(Value::Bool(value(k) == TRANSLATION_UNIT))
        }),
        check("is_unexposed", |k| Ok(Value::Bool(UNEXPOSED.contains(&value(k))))),
        property("name", |k| Ok(Value::Str(entity_kind_name(k)))),
        property("value", |k| Ok(Value::Int(value(k)))),
    ]
}

pub fn catalog() -> &'static Catalog<KindReader> {
    static CATALOG: OnceLock<Catalog<KindReader>> = OnceLock::new();
    CATALOG.get_or_init(|| Catalog::from_table(Category::Kind, table()))
}
