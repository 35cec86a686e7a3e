//! Type classification
//!
//! Maps any resolved type onto the closed set of kinds the schema knows
//! about. Classification always looks through an alias to its declared type.

use crate::analyzers::typescript::{TypeChecker, TypeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    Array,
    Tuple,
    Union,
    Intersection,
    Function,
    Enum,
    EnumLiteral,
    Object,
    Primitive,
}

impl TypeKind {
    pub fn label(self) -> &'static str {
        match self {
            TypeKind::Array => "array",
            TypeKind::Tuple => "tuple",
            TypeKind::Union => "union",
            TypeKind::Intersection => "intersection",
            TypeKind::Function => "function",
            TypeKind::Enum => "enum",
            TypeKind::EnumLiteral => "enum-literal",
            TypeKind::Object => "object",
            TypeKind::Primitive => "primitive",
        }
    }
}

/// The declared type behind an alias, or the type itself
pub fn resolve_alias<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> TypeId {
    checker.alias_declared_type(ty).unwrap_or(ty)
}

/// Classify a type; the first matching kind wins
pub fn classify<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> TypeKind {
    let ty = resolve_alias(checker, ty);

    if checker.is_array_type(ty) {
        TypeKind::Array
    } else if checker.is_tuple_type(ty) {
        TypeKind::Tuple
    } else if checker.is_union(ty) {
        TypeKind::Union
    } else if checker.is_intersection(ty) {
        TypeKind::Intersection
    } else if !checker.call_signatures(ty).is_empty() {
        TypeKind::Function
    } else if checker.is_enum_type(ty) {
        TypeKind::Enum
    } else if checker.is_literal(ty) {
        TypeKind::EnumLiteral
    } else if !checker.properties(ty).is_empty() {
        TypeKind::Object
    } else {
        TypeKind::Primitive
    }
}
