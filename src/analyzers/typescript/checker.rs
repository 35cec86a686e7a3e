//! Type introspection capability
//!
//! [`TypeChecker`] is the seam between the prop extraction algorithms and
//! whatever owns the type graph. Every question the extractor asks is an
//! explicit query here rather than a flag inspection.

use super::printer::type_to_string;
use super::types::{Member, Primitive, Signature, TypeData, TypeId, TypeTable};

/// Value of a literal type
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralValue {
    String(String),
    Number(String),
    Boolean(bool),
}

pub trait TypeChecker {
    /// Canonical printable form of a type
    fn type_to_string(&self, ty: TypeId) -> String;

    /// Own members of a type, in declaration order
    fn properties(&self, ty: TypeId) -> Vec<Member>;

    /// Type of a member resolved at its declaration site
    fn type_of_member(&self, member: &Member) -> TypeId;

    fn is_optional(&self, member: &Member) -> bool;

    fn is_array_type(&self, ty: TypeId) -> bool;

    fn is_tuple_type(&self, ty: TypeId) -> bool;

    fn is_union(&self, ty: TypeId) -> bool;

    fn is_intersection(&self, ty: TypeId) -> bool;

    fn is_string_literal(&self, ty: TypeId) -> bool;

    fn is_number_literal(&self, ty: TypeId) -> bool;

    fn is_boolean_literal(&self, ty: TypeId) -> bool;

    /// `undefined` or `null`
    fn is_nullish(&self, ty: TypeId) -> bool;

    /// Constituents of a union; empty for any other type
    fn union_types(&self, ty: TypeId) -> Vec<TypeId>;

    fn literal_value(&self, ty: TypeId) -> Option<LiteralValue>;

    fn call_signatures(&self, ty: TypeId) -> Vec<Signature>;

    fn is_enum_type(&self, ty: TypeId) -> bool;

    /// Declared type behind the alias a type was reached through
    fn alias_declared_type(&self, ty: TypeId) -> Option<TypeId>;

    /// Position of an intrinsic type (`string`, `number`, `false`, ...) in
    /// the order TypeScript lists union constituents; `None` otherwise
    fn intrinsic_rank(&self, ty: TypeId) -> Option<u8>;

    fn is_literal(&self, ty: TypeId) -> bool {
        self.is_string_literal(ty) || self.is_number_literal(ty) || self.is_boolean_literal(ty)
    }
}

impl TypeChecker for TypeTable {
    fn type_to_string(&self, ty: TypeId) -> String {
        type_to_string(self, ty)
    }

    fn properties(&self, ty: TypeId) -> Vec<Member> {
        self.members(ty)
    }

    fn type_of_member(&self, member: &Member) -> TypeId {
        member.site
    }

    fn is_optional(&self, member: &Member) -> bool {
        member.optional
    }

    fn is_array_type(&self, ty: TypeId) -> bool {
        matches!(self.data(ty), TypeData::Array(_))
    }

    fn is_tuple_type(&self, ty: TypeId) -> bool {
        matches!(self.data(ty), TypeData::Tuple(_))
    }

    fn is_union(&self, ty: TypeId) -> bool {
        matches!(self.data(ty), TypeData::Union(_))
    }

    fn is_intersection(&self, ty: TypeId) -> bool {
        matches!(self.data(ty), TypeData::Intersection(_))
    }

    fn is_string_literal(&self, ty: TypeId) -> bool {
        matches!(self.data(ty), TypeData::StringLiteral(_))
    }

    fn is_number_literal(&self, ty: TypeId) -> bool {
        matches!(self.data(ty), TypeData::NumberLiteral(_))
    }

    fn is_boolean_literal(&self, ty: TypeId) -> bool {
        matches!(self.data(ty), TypeData::BooleanLiteral(_))
    }

    fn is_nullish(&self, ty: TypeId) -> bool {
        matches!(
            self.data(ty),
            TypeData::Primitive(Primitive::Undefined | Primitive::Null)
        )
    }

    fn union_types(&self, ty: TypeId) -> Vec<TypeId> {
        match self.data(ty) {
            TypeData::Union(parts) => parts.clone(),
            _ => Vec::new(),
        }
    }

    fn literal_value(&self, ty: TypeId) -> Option<LiteralValue> {
        match self.data(ty) {
            TypeData::StringLiteral(value) => Some(LiteralValue::String(value.clone())),
            TypeData::NumberLiteral(value) => Some(LiteralValue::Number(value.clone())),
            TypeData::BooleanLiteral(value) => Some(LiteralValue::Boolean(*value)),
            _ => None,
        }
    }

    fn call_signatures(&self, ty: TypeId) -> Vec<Signature> {
        match self.data(ty) {
            TypeData::Function(signature) => vec![signature.clone()],
            TypeData::Object(object) => object.call_signatures.clone(),
            _ => Vec::new(),
        }
    }

    fn is_enum_type(&self, ty: TypeId) -> bool {
        matches!(self.data(ty), TypeData::Enum { .. })
    }

    fn alias_declared_type(&self, ty: TypeId) -> Option<TypeId> {
        self.alias(ty).map(|alias| alias.declared)
    }

    fn intrinsic_rank(&self, ty: TypeId) -> Option<u8> {
        let rank = match self.data(ty) {
            TypeData::Primitive(Primitive::Any) => 0,
            TypeData::Primitive(Primitive::Unknown) => 1,
            TypeData::Primitive(Primitive::Undefined) => 2,
            TypeData::Primitive(Primitive::Null) => 3,
            TypeData::Primitive(Primitive::String) => 4,
            TypeData::Primitive(Primitive::Number) => 5,
            TypeData::Primitive(Primitive::BigInt) => 6,
            TypeData::BooleanLiteral(false) => 7,
            TypeData::BooleanLiteral(true) => 8,
            TypeData::Primitive(Primitive::Symbol) => 9,
            TypeData::Primitive(Primitive::Void) => 10,
            TypeData::Primitive(Primitive::Never) => 11,
            TypeData::Primitive(Primitive::Object) => 12,
            _ => return None,
        };
        Some(rank)
    }
}
