//! Type-to-schema conversion
//!
//! [`extract_props`] walks the members of an object-like type and produces
//! one [`PropDefinition`] per member, recursing into nested objects and
//! unions. Recursion through object types is guarded by [`VisitedTypes`],
//! keyed on the printed form of each type being expanded.

use super::classifier::{classify, resolve_alias, TypeKind};
use super::normalizer::{cleanup_type_string, literal_text, normalize_union, UnionShape};
use crate::analyzers::typescript::{TypeChecker, TypeId};
use crate::core::PropDefinition;

const PRIMITIVE_TYPES: [&str; 6] = ["string", "number", "boolean", "void", "undefined", "null"];
const BUILT_IN_TYPES: [&str; 6] = ["Date", "RegExp", "Promise", "Array", "Map", "Set"];
const FRAMEWORK_TYPES: [&str; 3] = ["ReactNode", "ReactElement", "Element"];
const MAX_EXTRACTION_DEPTH: usize = 64;

/// Signatures of the object types currently being expanded.
///
/// Scoped to one top-level extraction. A signature is removed again once its
/// expansion finishes, so only a type nested inside itself is cut off.
#[derive(Debug, Default)]
pub struct VisitedTypes {
    stack: Vec<String>,
}

impl VisitedTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.stack.iter().any(|s| s == signature)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn enter(&mut self, signature: String) {
        self.stack.push(signature);
    }

    fn leave(&mut self) {
        self.stack.pop();
    }
}

/// Property schema of an object-like type
pub fn extract_props<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> Vec<PropDefinition> {
    let mut visited = VisitedTypes::new();
    extract_props_with(checker, ty, &mut visited)
}

/// Like [`extract_props`], threading an existing visited set
pub fn extract_props_with<C: TypeChecker + ?Sized>(
    checker: &C,
    ty: TypeId,
    visited: &mut VisitedTypes,
) -> Vec<PropDefinition> {
    let signature = checker.type_to_string(ty);
    if visited.contains(&signature) || visited.depth() >= MAX_EXTRACTION_DEPTH {
        log::trace!("Skipping recursive expansion of {signature}");
        return Vec::new();
    }

    visited.enter(signature);
    let props = checker
        .properties(ty)
        .iter()
        .filter(|member| member.declaration.is_some())
        .map(|member| {
            let member_type = checker.type_of_member(member);
            parse_property(
                checker,
                &member.name,
                member_type,
                checker.is_optional(member),
                visited,
            )
        })
        .collect();
    visited.leave();

    props
}

/// Schema node for one named, typed prop
pub fn parse_property<C: TypeChecker + ?Sized>(
    checker: &C,
    name: &str,
    ty: TypeId,
    optional: bool,
    visited: &mut VisitedTypes,
) -> PropDefinition {
    let required = !optional;
    let declared = resolve_alias(checker, ty);
    let display = checker.type_to_string(declared);
    let label = cleanup_type_string(&display);

    if PRIMITIVE_TYPES.contains(&display.as_str()) || is_built_in(&display) || is_framework(&label) {
        return PropDefinition::leaf(name, label, required);
    }

    match classify(checker, declared) {
        TypeKind::Union => parse_union(checker, name, ty, optional, visited),
        TypeKind::EnumLiteral => {
            PropDefinition::with_options(
                name,
                TypeKind::EnumLiteral.label(),
                required,
                vec![literal_text(checker, declared)],
            )
        }
        TypeKind::Object => {
            let children = extract_props_with(checker, ty, visited);
            PropDefinition::with_children(name, TypeKind::Object.label(), required, children)
        }
        _ => PropDefinition::leaf(name, label, required),
    }
}

fn parse_union<C: TypeChecker + ?Sized>(
    checker: &C,
    name: &str,
    ty: TypeId,
    optional: bool,
    visited: &mut VisitedTypes,
) -> PropDefinition {
    let required = !optional;

    match normalize_union(checker, ty) {
        UnionShape::Boolean => PropDefinition::leaf(name, "boolean", required),
        UnionShape::Literals(options) => {
            PropDefinition::with_options(name, TypeKind::EnumLiteral.label(), required, options)
        }
        UnionShape::Single(inner) => parse_property(checker, name, inner, optional, visited),
        UnionShape::Mixed(variants) if variants.is_empty() => {
            PropDefinition::leaf(name, "unknown", required)
        }
        UnionShape::Mixed(variants) => {
            let children = variants
                .into_iter()
                .map(|variant| parse_property(checker, name, variant, optional, visited))
                .collect();
            PropDefinition::with_children(name, TypeKind::Union.label(), required, children)
        }
    }
}

/// `Date`, `Promise<T>`, `Map<K, V>`, ...
fn is_built_in(display: &str) -> bool {
    BUILT_IN_TYPES.iter().any(|name| {
        display == *name
            || display
                .strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('<'))
    })
}

/// `ReactNode`, `ReactElement<P>`, `Element`, `HTMLElement`, ...
fn is_framework(label: &str) -> bool {
    let head = label.split('<').next().unwrap_or(label);
    FRAMEWORK_TYPES.iter().any(|name| head.ends_with(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::{
        DeclarationSite, FileId, Member, ObjectType, Primitive, Signature, TypeData, TypeTable,
    };
    use pretty_assertions::assert_eq;

    fn member(table: &mut TypeTable, name: &str, declared: TypeId, optional: bool) -> Member {
        let site = if optional {
            let undefined = table.undefined();
            table.union(vec![declared, undefined])
        } else {
            declared
        };
        Member {
            name: name.to_string(),
            declared,
            site,
            optional,
            declaration: Some(DeclarationSite {
                file: FileId::default(),
                line: 1,
            }),
        }
    }

    fn object(table: &mut TypeTable, name: Option<&str>, members: Vec<Member>) -> TypeId {
        table.alloc(TypeData::Object(ObjectType {
            name: name.map(String::from),
            members,
            call_signatures: vec![],
        }))
    }

    #[test]
    fn test_optional_boolean() {
        let mut table = TypeTable::new();
        let boolean = table.boolean();
        let disabled = member(&mut table, "disabled", boolean, true);
        let props = object(&mut table, Some("Props"), vec![disabled]);

        assert_eq!(
            extract_props(&table, props),
            vec![PropDefinition::leaf("disabled", "boolean", false)]
        );
    }

    #[test]
    fn test_optional_matches_plain_type_with_required_false() {
        let mut table = TypeTable::new();
        let a = table.string_literal("a");
        let b = table.string_literal("b");
        let letters = table.union(vec![a, b]);
        let undefined = table.undefined();
        let maybe = table.union(vec![letters, undefined]);

        let mut visited = VisitedTypes::new();
        let plain = parse_property(&table, "x", letters, true, &mut visited);
        let wrapped = parse_property(&table, "x", maybe, true, &mut visited);
        assert_eq!(plain, wrapped);
        assert!(!plain.required);
    }

    #[test]
    fn test_function_prop_keeps_signature() {
        let mut table = TypeTable::new();
        let void = table.primitive(Primitive::Void);
        let callback = table.alloc(TypeData::Function(Signature {
            params: vec![],
            return_type: void,
        }));
        let mut visited = VisitedTypes::new();
        assert_eq!(
            parse_property(&table, "onClick", callback, false, &mut visited),
            PropDefinition::leaf("onClick", "() => void", true)
        );
    }

    #[test]
    fn test_framework_and_built_in_types_stay_leaves() {
        let mut table = TypeTable::new();
        let node = table.alloc(TypeData::Reference {
            name: "React.ReactNode".into(),
            args: vec![],
        });
        let date = table.alloc(TypeData::Reference {
            name: "Date".into(),
            args: vec![],
        });
        let string = table.primitive(Primitive::String);
        let promise = table.alloc(TypeData::Reference {
            name: "Promise".into(),
            args: vec![string],
        });
        let mut visited = VisitedTypes::new();

        assert_eq!(
            parse_property(&table, "children", node, false, &mut visited).type_label,
            "ReactNode"
        );
        assert_eq!(
            parse_property(&table, "at", date, false, &mut visited).type_label,
            "Date"
        );
        assert_eq!(
            parse_property(&table, "load", promise, false, &mut visited).type_label,
            "Promise<string>"
        );
    }

    #[test]
    fn test_is_built_in_is_exact() {
        assert!(is_built_in("Date"));
        assert!(is_built_in("Map<string, number>"));
        assert!(!is_built_in("DatePickerProps"));
        assert!(is_framework("ReactElement<any>"));
        assert!(is_framework("Element"));
        assert!(!is_framework("ElementProps"));
    }

    #[test]
    fn test_nested_object_expands() {
        let mut table = TypeTable::new();
        let string = table.primitive(Primitive::String);
        let name = member(&mut table, "name", string, false);
        let user = object(&mut table, Some("User"), vec![name]);
        let user_member = member(&mut table, "user", user, true);
        let props = object(&mut table, Some("Props"), vec![user_member]);

        assert_eq!(
            extract_props(&table, props),
            vec![PropDefinition::with_children(
                "user",
                "object",
                false,
                vec![PropDefinition::leaf("name", "string", true)]
            )]
        );
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut table = TypeTable::new();
        let slot = table.reserve();
        let string = table.primitive(Primitive::String);
        let label = member(&mut table, "label", string, false);
        let parent = member(&mut table, "parent", slot, true);
        table.fill(
            slot,
            TypeData::Object(ObjectType {
                name: Some("TreeNode".into()),
                members: vec![label, parent],
                call_signatures: vec![],
            }),
        );

        assert_eq!(
            extract_props(&table, slot),
            vec![
                PropDefinition::leaf("label", "string", true),
                PropDefinition::with_children("parent", "object", false, vec![]),
            ]
        );
    }

    #[test]
    fn test_siblings_sharing_a_type_both_expand() {
        let mut table = TypeTable::new();
        let number = table.primitive(Primitive::Number);
        let x = member(&mut table, "x", number, false);
        let point = object(&mut table, Some("Point"), vec![x]);
        let from = member(&mut table, "from", point, false);
        let to = member(&mut table, "to", point, false);
        let props = object(&mut table, Some("Props"), vec![from, to]);

        let props = extract_props(&table, props);
        assert_eq!(props.len(), 2);
        assert!(props
            .iter()
            .all(|p| p.children.as_ref().is_some_and(|c| c.len() == 1)));
    }

    #[test]
    fn test_members_without_declaration_are_skipped() {
        let mut table = TypeTable::new();
        let string = table.primitive(Primitive::String);
        let mut synthetic = member(&mut table, "synthetic", string, false);
        synthetic.declaration = None;
        let props = object(&mut table, None, vec![synthetic]);
        assert!(extract_props(&table, props).is_empty());
    }

    #[test]
    fn test_mixed_union_children() {
        let mut table = TypeTable::new();
        let number = table.primitive(Primitive::Number);
        let auto = table.string_literal("auto");
        let width = table.union(vec![number, auto]);
        let mut visited = VisitedTypes::new();

        assert_eq!(
            parse_property(&table, "width", width, false, &mut visited),
            PropDefinition::with_children(
                "width",
                "union",
                true,
                vec![
                    PropDefinition::leaf("width", "number", true),
                    PropDefinition::with_options("width", "enum-literal", true, vec!["auto".into()]),
                ]
            )
        );
    }

    #[test]
    fn test_nullish_only_union_is_unknown() {
        let mut table = TypeTable::new();
        let null = table.primitive(Primitive::Null);
        let undefined = table.undefined();
        let nothing = table.union(vec![null, undefined]);
        let mut visited = VisitedTypes::new();
        assert_eq!(
            parse_property(&table, "slot", nothing, true, &mut visited),
            PropDefinition::leaf("slot", "unknown", false)
        );
    }
}
