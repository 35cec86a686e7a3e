//! Type binder: turns type syntax into types in a [`TypeTable`]
//!
//! Named declarations (interfaces, type aliases, enums) are bound once and
//! cached by declaration node. A declaration's slot is reserved before its
//! body is bound, so a body that mentions the declaration again resolves to
//! the reserved id instead of recursing.

use super::parser::{has_token, named_children, node_line, node_text, normalized_text, unquote};
use super::printer::type_to_string;
use super::program::{Declaration, FileId, Namespace, Program};
use super::types::{
    DeclarationSite, Member, ObjectType, Parameter, Primitive, Signature, TupleElement, TypeData,
    TypeId, TypeTable,
};
use std::collections::HashMap;
use tree_sitter::Node;

const MAX_BIND_DEPTH: usize = 200;

pub struct TypeBinder<'p> {
    program: &'p Program,
    table: TypeTable,
    declared: HashMap<(FileId, usize), TypeId>,
    depth: usize,
}

impl<'p> TypeBinder<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            table: TypeTable::new(),
            declared: HashMap::new(),
            depth: 0,
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    pub fn into_table(self) -> TypeTable {
        self.table
    }

    /// Type denoted by a type syntax node
    pub fn type_at_location(&mut self, file: FileId, node: Node<'p>) -> TypeId {
        self.bind_type(file, node, &[])
    }

    /// Type declared by an interface, type alias or enum declaration
    pub fn declared_type(&mut self, declaration: Declaration<'p>) -> TypeId {
        self.bind_declaration(declaration.file, declaration.node)
    }

    fn text(&self, file: FileId, node: &Node) -> &'p str {
        node_text(node, &self.program.file(file).source)
    }

    fn bind_type(&mut self, file: FileId, node: Node<'p>, scope: &[String]) -> TypeId {
        if self.depth > MAX_BIND_DEPTH {
            return self.table.any();
        }
        self.depth += 1;
        let ty = self.bind_type_inner(file, node, scope);
        self.depth -= 1;
        ty
    }

    fn bind_type_inner(&mut self, file: FileId, node: Node<'p>, scope: &[String]) -> TypeId {
        match node.kind() {
            "type_annotation" | "parenthesized_type" | "readonly_type" => {
                match named_children(&node).into_iter().next() {
                    Some(inner) => self.bind_type(file, inner, scope),
                    None => self.table.any(),
                }
            }
            "predefined_type" => {
                let keyword = normalized_text(&node, &self.program.file(file).source);
                if keyword == "boolean" {
                    self.table.boolean()
                } else {
                    match Primitive::from_keyword(&keyword) {
                        Some(primitive) => self.table.primitive(primitive),
                        None => self.table.any(),
                    }
                }
            }
            "literal_type" => self.bind_literal(file, node),
            "undefined" => self.table.undefined(),
            "null" => self.table.primitive(Primitive::Null),
            "template_literal_type" => self.table.primitive(Primitive::String),
            "type_identifier" | "identifier" => {
                let name = self.text(file, &node);
                self.bind_named(file, name, Vec::new(), scope)
            }
            "generic_type" => self.bind_generic(file, node, scope),
            "object_type" => {
                let object = self.bind_members(file, node, scope, None);
                self.table.alloc(TypeData::Object(object))
            }
            "array_type" => {
                let element = match named_children(&node).into_iter().next() {
                    Some(inner) => self.bind_type(file, inner, scope),
                    None => self.table.any(),
                };
                self.table.array(element)
            }
            "tuple_type" => self.bind_tuple(file, node, scope),
            "union_type" => {
                let parts = self.bind_children(file, node, scope);
                self.table.union(parts)
            }
            "intersection_type" => {
                let parts = self.bind_children(file, node, scope);
                self.table.intersection(parts)
            }
            "function_type" => {
                let signature = self.bind_signature(file, node, scope);
                self.table.alloc(TypeData::Function(signature))
            }
            // `React.ReactNode`, `typeof x`, `keyof T`, conditional and mapped
            // types: kept opaque under their source text
            _ => self.opaque(file, node),
        }
    }

    fn opaque(&mut self, file: FileId, node: Node<'p>) -> TypeId {
        let name = normalized_text(&node, &self.program.file(file).source);
        self.table.alloc(TypeData::Reference {
            name,
            args: Vec::new(),
        })
    }

    fn bind_children(&mut self, file: FileId, node: Node<'p>, scope: &[String]) -> Vec<TypeId> {
        named_children(&node)
            .into_iter()
            .map(|child| self.bind_type(file, child, scope))
            .collect()
    }

    fn bind_literal(&mut self, file: FileId, node: Node<'p>) -> TypeId {
        let Some(value) = named_children(&node).into_iter().next() else {
            return self.opaque(file, node);
        };
        let text = self.text(file, &value);
        match value.kind() {
            "string" => self.table.string_literal(unquote(text)),
            "number" | "unary_expression" => match canonical_number(text) {
                Some(number) => self.table.number_literal(number),
                None => self.opaque(file, node),
            },
            "true" => self.table.boolean_literal(true),
            "false" => self.table.boolean_literal(false),
            "null" => self.table.primitive(Primitive::Null),
            "undefined" => self.table.undefined(),
            _ => self.opaque(file, node),
        }
    }

    fn bind_named(
        &mut self,
        file: FileId,
        name: &str,
        args: Vec<TypeId>,
        scope: &[String],
    ) -> TypeId {
        if scope.iter().any(|param| param == name) {
            return self.table.alloc(TypeData::TypeParameter(name.to_string()));
        }

        if let Some(declaration) = self.program.resolve(file, name, Namespace::Type) {
            return self.bind_declaration(declaration.file, declaration.node);
        }

        match (name, args.as_slice()) {
            ("Array" | "ReadonlyArray", [element]) => return self.table.array(*element),
            ("Partial" | "Required" | "Readonly" | "Pick" | "Omit", _) => {
                if let Some(ty) = self.apply_utility(name, &args) {
                    return ty;
                }
            }
            _ => {}
        }

        self.table.alloc(TypeData::Reference {
            name: name.to_string(),
            args,
        })
    }

    fn bind_generic(&mut self, file: FileId, node: Node<'p>, scope: &[String]) -> TypeId {
        let args = match node.child_by_field_name("type_arguments") {
            Some(arguments) => self.bind_children(file, arguments, scope),
            None => Vec::new(),
        };
        let Some(name_node) = node.child_by_field_name("name") else {
            return self.opaque(file, node);
        };

        if name_node.kind() == "nested_type_identifier" {
            let name = normalized_text(&name_node, &self.program.file(file).source);
            return self.table.alloc(TypeData::Reference { name, args });
        }

        let name = self.text(file, &name_node);
        self.bind_named(file, name, args, scope)
    }

    /// `Partial`, `Required`, `Readonly`, `Pick`, `Omit` over a known object type
    fn apply_utility(&mut self, name: &str, args: &[TypeId]) -> Option<TypeId> {
        let base = *args.first()?;
        let members = self.table.members(base);
        if members.is_empty() {
            return None;
        }

        let members: Vec<Member> = match (name, args) {
            ("Partial", [_]) => members
                .into_iter()
                .map(|member| self.with_optionality(member, true))
                .collect(),
            ("Required", [_]) => members
                .into_iter()
                .map(|member| self.with_optionality(member, false))
                .collect(),
            ("Readonly", [_]) => members,
            ("Pick", [_, keys]) => {
                let keys = self.literal_keys(*keys);
                members
                    .into_iter()
                    .filter(|member| keys.contains(&member.name))
                    .collect()
            }
            ("Omit", [_, keys]) => {
                let keys = self.literal_keys(*keys);
                members
                    .into_iter()
                    .filter(|member| !keys.contains(&member.name))
                    .collect()
            }
            _ => return None,
        };

        let rendered: Vec<String> = args
            .iter()
            .map(|arg| type_to_string(&self.table, *arg))
            .collect();
        let display = format!("{}<{}>", name, rendered.join(", "));

        Some(self.table.alloc(TypeData::Object(ObjectType {
            name: Some(display),
            members,
            call_signatures: Vec::new(),
        })))
    }

    fn with_optionality(&mut self, member: Member, optional: bool) -> Member {
        let site = if optional {
            let undefined = self.table.undefined();
            self.table.union(vec![member.declared, undefined])
        } else {
            member.declared
        };
        Member {
            site,
            optional,
            ..member
        }
    }

    fn literal_keys(&self, keys: TypeId) -> Vec<String> {
        let parts = match self.table.data(keys) {
            TypeData::Union(parts) => parts.clone(),
            _ => vec![keys],
        };
        parts
            .into_iter()
            .filter_map(|part| match self.table.data(part) {
                TypeData::StringLiteral(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    fn bind_tuple(&mut self, file: FileId, node: Node<'p>, scope: &[String]) -> TypeId {
        let mut elements = Vec::new();
        for child in named_children(&node) {
            let (inner, optional, rest) = match child.kind() {
                "optional_type" => (named_children(&child).into_iter().next(), true, false),
                "rest_type" => (named_children(&child).into_iter().next(), false, true),
                "tuple_parameter" => (child.child_by_field_name("type"), false, false),
                "optional_tuple_parameter" => (child.child_by_field_name("type"), true, false),
                _ => (Some(child), false, false),
            };
            let ty = match inner {
                Some(inner) => self.bind_type(file, inner, scope),
                None => self.table.any(),
            };
            elements.push(TupleElement { ty, optional, rest });
        }
        self.table.alloc(TypeData::Tuple(elements))
    }

    fn bind_declaration(&mut self, file: FileId, node: Node<'p>) -> TypeId {
        let key = (file, node.id());
        if let Some(id) = self.declared.get(&key) {
            return *id;
        }

        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(file, &n).to_string())
            .unwrap_or_default();

        match node.kind() {
            "interface_declaration" => {
                let slot = self.table.reserve();
                self.declared.insert(key, slot);
                let scope = type_parameter_names(&node, self.program, file, &[]);
                let object = match node.child_by_field_name("body") {
                    Some(body) => self.bind_members(file, body, &scope, Some(name)),
                    None => ObjectType {
                        name: Some(name),
                        members: Vec::new(),
                        call_signatures: Vec::new(),
                    },
                };
                let object = self.inherit_members(file, node, &scope, object);
                self.table.fill(slot, TypeData::Object(object));
                slot
            }
            "type_alias_declaration" => {
                let slot = self.table.reserve();
                self.declared.insert(key, slot);
                let scope = type_parameter_names(&node, self.program, file, &[]);
                let body = match node.child_by_field_name("value") {
                    Some(value) => self.bind_type(file, value, &scope),
                    None => self.table.any(),
                };
                if body == slot {
                    self.table.fill(slot, TypeData::Primitive(Primitive::Any));
                } else {
                    self.table.fill_alias(slot, name, body);
                }
                slot
            }
            "enum_declaration" => {
                let members = node
                    .child_by_field_name("body")
                    .map(|body| enum_member_names(&body, self.program, file))
                    .unwrap_or_default();
                let id = self.table.alloc(TypeData::Enum { name, members });
                self.declared.insert(key, id);
                id
            }
            _ => {
                let id = self.table.alloc(TypeData::Reference {
                    name,
                    args: Vec::new(),
                });
                self.declared.insert(key, id);
                id
            }
        }
    }

    /// Append members of `extends` bases that the interface does not redeclare
    fn inherit_members(
        &mut self,
        file: FileId,
        node: Node<'p>,
        scope: &[String],
        mut object: ObjectType,
    ) -> ObjectType {
        let clauses = named_children(&node)
            .into_iter()
            .filter(|child| matches!(child.kind(), "extends_type_clause" | "extends_clause"));

        for clause in clauses {
            for base_node in named_children(&clause) {
                let base = self.bind_type(file, base_node, scope);
                for member in self.table.members(base) {
                    if !object.members.iter().any(|own| own.name == member.name) {
                        object.members.push(member);
                    }
                }
            }
        }

        object
    }

    /// Members and call signatures of an interface body or object type literal
    fn bind_members(
        &mut self,
        file: FileId,
        body: Node<'p>,
        scope: &[String],
        name: Option<String>,
    ) -> ObjectType {
        let mut object = ObjectType {
            name,
            members: Vec::new(),
            call_signatures: Vec::new(),
        };

        for child in named_children(&body) {
            match child.kind() {
                "property_signature" => {
                    let Some(name) = self.property_name(file, &child) else {
                        continue;
                    };
                    let declared = match child.child_by_field_name("type") {
                        Some(annotation) => self.bind_type(file, annotation, scope),
                        None => self.table.any(),
                    };
                    let member = self.member(file, &child, name, declared);
                    object.members.push(member);
                }
                "method_signature" => {
                    let Some(name) = self.property_name(file, &child) else {
                        continue;
                    };
                    let signature = self.bind_signature(file, child, scope);
                    let declared = self.table.alloc(TypeData::Function(signature));
                    let member = self.member(file, &child, name, declared);
                    object.members.push(member);
                }
                "call_signature" => {
                    let signature = self.bind_signature(file, child, scope);
                    object.call_signatures.push(signature);
                }
                _ => {}
            }
        }

        object
    }

    fn member(&mut self, file: FileId, node: &Node<'p>, name: String, declared: TypeId) -> Member {
        let optional = has_token(node, "?");
        let site = if optional {
            let undefined = self.table.undefined();
            self.table.union(vec![declared, undefined])
        } else {
            declared
        };
        Member {
            name,
            declared,
            site,
            optional,
            declaration: Some(DeclarationSite {
                file,
                line: node_line(node),
            }),
        }
    }

    fn property_name(&self, file: FileId, node: &Node<'p>) -> Option<String> {
        let name = node.child_by_field_name("name")?;
        let text = self.text(file, &name);
        Some(match name.kind() {
            "string" => unquote(text).to_string(),
            _ => text.to_string(),
        })
    }

    /// Parameters and return type of a function type or signature node
    fn bind_signature(&mut self, file: FileId, node: Node<'p>, scope: &[String]) -> Signature {
        let scope = type_parameter_names(&node, self.program, file, scope);

        let mut params = Vec::new();
        if let Some(parameters) = node.child_by_field_name("parameters") {
            for (index, param) in named_children(&parameters).into_iter().enumerate() {
                if !matches!(param.kind(), "required_parameter" | "optional_parameter") {
                    continue;
                }
                let (name, rest) = match param.child_by_field_name("pattern") {
                    Some(pattern) if pattern.kind() == "identifier" => {
                        (self.text(file, &pattern).to_string(), false)
                    }
                    Some(pattern) if pattern.kind() == "rest_pattern" => {
                        let inner = self.text(file, &pattern).trim_start_matches("...");
                        (inner.trim().to_string(), true)
                    }
                    Some(pattern) if pattern.kind() == "this" => continue,
                    // Destructured parameters print like the checker does
                    _ => (format!("__{index}"), false),
                };
                let ty = match param.child_by_field_name("type") {
                    Some(annotation) => self.bind_type(file, annotation, &scope),
                    None => self.table.any(),
                };
                params.push(Parameter {
                    name,
                    ty,
                    optional: param.kind() == "optional_parameter",
                    rest,
                });
            }
        }

        let return_type = match node.child_by_field_name("return_type") {
            Some(ret) => self.bind_type(file, ret, &scope),
            None => self.table.any(),
        };

        Signature {
            params,
            return_type,
        }
    }
}

/// Outer scope extended with the type parameters a node declares
fn type_parameter_names(node: &Node, program: &Program, file: FileId, outer: &[String]) -> Vec<String> {
    let mut names = outer.to_vec();
    if let Some(params) = node.child_by_field_name("type_parameters") {
        for param in named_children(&params) {
            if let Some(name) = param.child_by_field_name("name") {
                names.push(node_text(&name, &program.file(file).source).to_string());
            }
        }
    }
    names
}

fn enum_member_names(body: &Node, program: &Program, file: FileId) -> Vec<String> {
    let source = &program.file(file).source;
    named_children(body)
        .into_iter()
        .filter_map(|member| match member.kind() {
            "property_identifier" => Some(node_text(&member, source).to_string()),
            "string" => Some(unquote(node_text(&member, source)).to_string()),
            "enum_assignment" => member
                .child_by_field_name("name")
                .map(|name| unquote(node_text(&name, source)).to_string()),
            _ => None,
        })
        .collect()
}

/// Decimal form of a number literal, the way JavaScript prints it
pub fn canonical_number(text: &str) -> Option<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .collect();
    let (negative, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
    };

    let radix = |prefixes: [&str; 2]| prefixes.iter().find_map(|p| body.strip_prefix(p));
    let value = if let Some(hex) = radix(["0x", "0X"]) {
        u64::from_str_radix(hex, 16).ok()? as f64
    } else if let Some(octal) = radix(["0o", "0O"]) {
        u64::from_str_radix(octal, 8).ok()? as f64
    } else if let Some(binary) = radix(["0b", "0B"]) {
        u64::from_str_radix(binary, 2).ok()? as f64
    } else {
        body.strip_suffix('n').unwrap_or(body).parse::<f64>().ok()?
    };

    let value = if negative { -value } else { value };
    if value == 0.0 {
        return Some("0".to_string());
    }
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e21 {
        Some(format!("{value:.0}"))
    } else {
        Some(format!("{value}"))
    }
}
