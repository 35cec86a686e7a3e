//! Interned type graph
//!
//! Every type the binder produces lives in a [`TypeTable`] arena and is
//! addressed by a [`TypeId`]. Primitive and literal types are interned, so
//! two occurrences of `"primary"` share an id and unions deduplicate by id.
//! Named declarations are bound once, which keeps self-referential types
//! finite: the cycle is a back edge to an existing id.

use std::collections::HashMap;

use super::program::FileId;

/// Index of a type in a [`TypeTable`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Keyword types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    BigInt,
    Symbol,
    Object,
    Void,
    Undefined,
    Null,
    Any,
    Unknown,
    Never,
}

impl Primitive {
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::BigInt => "bigint",
            Primitive::Symbol => "symbol",
            Primitive::Object => "object",
            Primitive::Void => "void",
            Primitive::Undefined => "undefined",
            Primitive::Null => "null",
            Primitive::Any => "any",
            Primitive::Unknown => "unknown",
            Primitive::Never => "never",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let primitive = match keyword {
            "string" => Primitive::String,
            "number" => Primitive::Number,
            "bigint" => Primitive::BigInt,
            "symbol" | "unique symbol" => Primitive::Symbol,
            "object" => Primitive::Object,
            "void" => Primitive::Void,
            "undefined" => Primitive::Undefined,
            "null" => Primitive::Null,
            "any" => Primitive::Any,
            "unknown" => Primitive::Unknown,
            "never" => Primitive::Never,
            _ => return None,
        };
        Some(primitive)
    }
}

/// Where a member was declared
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeclarationSite {
    pub file: FileId,
    pub line: usize,
}

/// A property of an object-like type
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub name: String,
    /// Type as written in the annotation
    pub declared: TypeId,
    /// Type at the declaration site; `declared | undefined` for optional members
    pub site: TypeId,
    pub optional: bool,
    pub declaration: Option<DeclarationSite>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeId,
    pub optional: bool,
    pub rest: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    pub params: Vec<Parameter>,
    pub return_type: TypeId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    /// Declared name for interfaces and utility instantiations; `None` for literals
    pub name: Option<String>,
    pub members: Vec<Member>,
    pub call_signatures: Vec<Signature>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TupleElement {
    pub ty: TypeId,
    pub optional: bool,
    pub rest: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeData {
    Primitive(Primitive),
    StringLiteral(String),
    /// Number literal in its canonical decimal form
    NumberLiteral(String),
    BooleanLiteral(bool),
    Union(Vec<TypeId>),
    Intersection(Vec<TypeId>),
    Array(TypeId),
    Tuple(Vec<TupleElement>),
    Object(ObjectType),
    Function(Signature),
    Enum { name: String, members: Vec<String> },
    TypeParameter(String),
    /// Named type whose structure is not known (external module, DOM, lib)
    Reference { name: String, args: Vec<TypeId> },
    /// Reserved slot of a declaration that is still being bound
    Pending,
}

/// Alias a type was reached through (`type Size = ...`)
#[derive(Clone, Debug, PartialEq)]
pub struct AliasSymbol {
    pub name: String,
    pub declared: TypeId,
}

#[derive(Clone, Debug)]
struct TypeEntry {
    data: TypeData,
    alias: Option<AliasSymbol>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum InternKey {
    Primitive(Primitive),
    String(String),
    Number(String),
    Boolean(bool),
    Union(Vec<TypeId>),
    Array(TypeId),
}

/// Arena of all bound types
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    entries: Vec<TypeEntry>,
    interned: HashMap<InternKey, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Structure of a type.
    ///
    /// An alias bound while its target was still pending forwards to the
    /// target, so aliases of mutually recursive declarations see the final
    /// structure.
    pub fn data(&self, id: TypeId) -> &TypeData {
        const MAX_ALIAS_HOPS: usize = 8;
        let mut current = id;
        for _ in 0..MAX_ALIAS_HOPS {
            let entry = &self.entries[current.index()];
            match (&entry.data, &entry.alias) {
                (TypeData::Pending, Some(alias)) if alias.declared != current => {
                    current = alias.declared;
                }
                _ => return &entry.data,
            }
        }
        &self.entries[current.index()].data
    }

    pub fn alias(&self, id: TypeId) -> Option<&AliasSymbol> {
        self.entries[id.index()].alias.as_ref()
    }

    /// Add a new, non-interned type
    pub fn alloc(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.entries.len() as u32);
        self.entries.push(TypeEntry { data, alias: None });
        id
    }

    /// Reserve a slot for a declaration whose body may refer back to it
    pub fn reserve(&mut self) -> TypeId {
        self.alloc(TypeData::Pending)
    }

    pub fn fill(&mut self, id: TypeId, data: TypeData) {
        self.entries[id.index()].data = data;
    }

    /// Turn a reserved slot into an alias of `declared`
    pub fn fill_alias(&mut self, id: TypeId, name: impl Into<String>, declared: TypeId) {
        let data = self.data(declared).clone();
        let entry = &mut self.entries[id.index()];
        entry.data = data;
        entry.alias = Some(AliasSymbol {
            name: name.into(),
            declared,
        });
    }

    fn intern(&mut self, key: InternKey, data: TypeData) -> TypeId {
        if let Some(id) = self.interned.get(&key) {
            return *id;
        }
        let id = self.alloc(data);
        self.interned.insert(key, id);
        id
    }

    pub fn primitive(&mut self, primitive: Primitive) -> TypeId {
        self.intern(
            InternKey::Primitive(primitive),
            TypeData::Primitive(primitive),
        )
    }

    pub fn undefined(&mut self) -> TypeId {
        self.primitive(Primitive::Undefined)
    }

    pub fn any(&mut self) -> TypeId {
        self.primitive(Primitive::Any)
    }

    pub fn string_literal(&mut self, value: impl Into<String>) -> TypeId {
        let value = value.into();
        self.intern(
            InternKey::String(value.clone()),
            TypeData::StringLiteral(value),
        )
    }

    pub fn number_literal(&mut self, value: impl Into<String>) -> TypeId {
        let value = value.into();
        self.intern(
            InternKey::Number(value.clone()),
            TypeData::NumberLiteral(value),
        )
    }

    pub fn boolean_literal(&mut self, value: bool) -> TypeId {
        self.intern(InternKey::Boolean(value), TypeData::BooleanLiteral(value))
    }

    /// `boolean`, represented as the union `false | true`
    pub fn boolean(&mut self) -> TypeId {
        let f = self.boolean_literal(false);
        let t = self.boolean_literal(true);
        self.union(vec![f, t])
    }

    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.intern(InternKey::Array(element), TypeData::Array(element))
    }

    /// Build a union, flattening nested unions and dropping duplicates.
    ///
    /// A single remaining constituent is returned as-is.
    pub fn union(&mut self, types: Vec<TypeId>) -> TypeId {
        let mut flat: Vec<TypeId> = Vec::with_capacity(types.len());
        for ty in types {
            match self.data(ty) {
                TypeData::Union(inner) => {
                    for member in inner.clone() {
                        if !flat.contains(&member) {
                            flat.push(member);
                        }
                    }
                }
                TypeData::Primitive(Primitive::Never) => {}
                _ => {
                    if !flat.contains(&ty) {
                        flat.push(ty);
                    }
                }
            }
        }

        match flat.len() {
            0 => self.primitive(Primitive::Never),
            1 => flat[0],
            _ => self.intern(InternKey::Union(flat.clone()), TypeData::Union(flat)),
        }
    }

    pub fn intersection(&mut self, types: Vec<TypeId>) -> TypeId {
        let mut flat: Vec<TypeId> = Vec::with_capacity(types.len());
        for ty in types {
            match self.data(ty) {
                TypeData::Intersection(inner) => flat.extend(inner.iter().copied()),
                _ => flat.push(ty),
            }
        }
        if flat.len() == 1 {
            return flat[0];
        }
        self.alloc(TypeData::Intersection(flat))
    }

    /// Members of an object-like type.
    ///
    /// Intersections merge their constituents (first declaration wins);
    /// unions expose the members every constituent shares.
    pub fn members(&self, id: TypeId) -> Vec<Member> {
        self.members_at_depth(id, 0)
    }

    fn members_at_depth(&self, id: TypeId, depth: usize) -> Vec<Member> {
        const MAX_DEPTH: usize = 32;
        if depth > MAX_DEPTH {
            return Vec::new();
        }

        match self.data(id) {
            TypeData::Object(object) => object.members.clone(),
            TypeData::Intersection(parts) => {
                let mut merged: Vec<Member> = Vec::new();
                for part in parts {
                    for member in self.members_at_depth(*part, depth + 1) {
                        if !merged.iter().any(|m| m.name == member.name) {
                            merged.push(member);
                        }
                    }
                }
                merged
            }
            TypeData::Union(parts) => {
                let mut sets = parts
                    .iter()
                    .map(|part| self.members_at_depth(*part, depth + 1));
                let Some(first) = sets.next() else {
                    return Vec::new();
                };
                let rest: Vec<Vec<Member>> = sets.collect();
                first
                    .into_iter()
                    .filter(|m| rest.iter().all(|set| set.iter().any(|o| o.name == m.name)))
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals_are_interned() {
        let mut table = TypeTable::new();
        let a = table.string_literal("primary");
        let b = table.string_literal("primary");
        let c = table.string_literal("secondary");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_union_flattens_and_dedupes() {
        let mut table = TypeTable::new();
        let a = table.string_literal("a");
        let b = table.string_literal("b");
        let inner = table.union(vec![a, b]);
        let undefined = table.undefined();
        let outer = table.union(vec![inner, a, undefined]);

        assert_eq!(table.data(outer), &TypeData::Union(vec![a, b, undefined]));
    }

    #[test]
    fn test_single_member_union_collapses() {
        let mut table = TypeTable::new();
        let s = table.primitive(Primitive::String);
        assert_eq!(table.union(vec![s, s]), s);
    }

    #[test]
    fn test_boolean_is_literal_union() {
        let mut table = TypeTable::new();
        let boolean = table.boolean();
        let f = table.boolean_literal(false);
        let t = table.boolean_literal(true);
        assert_eq!(table.data(boolean), &TypeData::Union(vec![f, t]));
        assert_eq!(table.boolean(), boolean);
    }

    #[test]
    fn test_fill_alias_copies_structure() {
        let mut table = TypeTable::new();
        let slot = table.reserve();
        let a = table.string_literal("a");
        let b = table.string_literal("b");
        let body = table.union(vec![a, b]);
        table.fill_alias(slot, "Letter", body);

        assert_eq!(table.data(slot), table.data(body));
        assert_eq!(table.alias(slot).map(|a| a.declared), Some(body));
        assert!(table.alias(body).is_none());
    }

    #[test]
    fn test_intersection_merges_members() {
        let mut table = TypeTable::new();
        let s = table.primitive(Primitive::String);
        let n = table.primitive(Primitive::Number);
        let member = |name: &str, ty| Member {
            name: name.to_string(),
            declared: ty,
            site: ty,
            optional: false,
            declaration: None,
        };
        let left = table.alloc(TypeData::Object(ObjectType {
            name: Some("A".into()),
            members: vec![member("id", s), member("label", s)],
            call_signatures: vec![],
        }));
        let right = table.alloc(TypeData::Object(ObjectType {
            name: Some("B".into()),
            members: vec![member("id", n), member("count", n)],
            call_signatures: vec![],
        }));
        let both = table.intersection(vec![left, right]);

        let names: Vec<String> = table.members(both).into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["id", "label", "count"]);
        assert_eq!(table.members(both)[0].declared, s);
    }
}
