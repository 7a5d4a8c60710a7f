//! libclang spellings for the `clang` crate's enumerations.
//!
//! The crate names variants in `CamelCase` and sometimes differently from
//! libclang (`Method` for `CXX_METHOD`). Output uses libclang's
//! spellings, so names are derived from the variant and corrected from a
//! table keyed by the libclang numeric value.

use std::fmt::Debug;

use clang::{EntityKind, TypeKind};
use cxtree_core::EnumMember;

/// Entity kinds whose libclang spelling is not the variant in
/// `SCREAMING_SNAKE_CASE`.
const ENTITY_KIND_NAMES: &[(i64, &str)] = &[
    (21, "CXX_METHOD"),
    (28, "TEMPLATE_NON_TYPE_PARAMETER"),
    (39, "CXX_ACCESS_SPEC_DECL"),
    (44, "CXX_BASE_SPECIFIER"),
    (115, "COMPOUND_ASSIGNMENT_OPERATOR"),
    (117, "CSTYLE_CAST_EXPR"),
    (123, "GNU_NULL_EXPR"),
    (124, "CXX_STATIC_CAST_EXPR"),
    (125, "CXX_DYNAMIC_CAST_EXPR"),
    (126, "CXX_REINTERPRET_CAST_EXPR"),
    (127, "CXX_CONST_CAST_EXPR"),
    (128, "CXX_FUNCTIONAL_CAST_EXPR"),
    (129, "CXX_TYPEID_EXPR"),
    (130, "CXX_BOOL_LITERAL_EXPR"),
    (131, "CXX_NULL_PTR_LITERAL_EXPR"),
    (132, "CXX_THIS_EXPR"),
    (133, "CXX_THROW_EXPR"),
    (134, "CXX_NEW_EXPR"),
    (135, "CXX_DELETE_EXPR"),
    (136, "CXX_UNARY_EXPR"),
    (215, "ASM_STMT"),
    (223, "CXX_CATCH_STMT"),
    (224, "CXX_TRY_STMT"),
    (225, "CXX_FOR_RANGE_STMT"),
    (404, "CXX_FINAL_ATTR"),
    (405, "CXX_OVERRIDE_ATTR"),
    (412, "CUDACONSTANT_ATTR"),
    (413, "CUDADEVICE_ATTR"),
    (414, "CUDAGLOBAL_ATTR"),
    (415, "CUDAHOST_ATTR"),
    (416, "CUDASHARED_ATTR"),
    (418, "DLLEXPORT_ATTR"),
    (419, "DLLIMPORT_ATTR"),
    (502, "MACRO_INSTANTIATION"),
];

/// Type kinds whose libclang spelling is not the variant upper-cased.
const TYPE_KIND_NAMES: &[(i64, &str)] = &[
    (4, "CHAR_U"),
    (13, "CHAR_S"),
    (110, "FUNCTIONNOPROTO"),
    (111, "FUNCTIONPROTO"),
];

fn lookup(table: &[(i64, &'static str)], value: i64) -> Option<&'static str> {
    table
        .iter()
        .find(|(v, _)| *v == value)
        .map(|&(_, name)| name)
}

/// `CamelCase` to `SCREAMING_SNAKE_CASE`, treating `ObjC` as one word and
/// keeping acronym runs together (`GNUNullExpr` becomes `GNU_NULL_EXPR`).
#[must_use]
pub fn screaming_snake(camel: &str) -> String {
    let source = camel.replace("ObjC", "Objc");
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(chars.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}

#[must_use]
pub fn entity_kind_name(kind: EntityKind) -> String {
    lookup(ENTITY_KIND_NAMES, kind as i64)
        .map_or_else(|| screaming_snake(&format!("{kind:?}")), str::to_string)
}

#[must_use]
pub fn type_kind_name(kind: TypeKind) -> String {
    lookup(TYPE_KIND_NAMES, kind as i64)
        .map_or_else(|| format!("{kind:?}").to_ascii_uppercase(), str::to_string)
}

#[must_use]
pub fn entity_kind_member(kind: EntityKind) -> EnumMember {
    EnumMember::new(entity_kind_name(kind), kind as i64)
}

#[must_use]
pub fn type_kind_member(kind: TypeKind) -> EnumMember {
    EnumMember::new(type_kind_name(kind), kind as i64)
}

/// Any other `clang` enumeration, e.g. `Accessibility::Public` as
/// `{ name: "PUBLIC", value: 1 }`.
#[must_use]
pub fn enum_member<T: Debug>(member: T, value: i64) -> EnumMember {
    EnumMember::new(screaming_snake(&format!("{member:?}")), value)
}
