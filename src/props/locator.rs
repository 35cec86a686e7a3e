//! Component locator
//!
//! Finds the props type of a component from the syntax that defines it:
//! plain functions, arrow functions, `memo(...)`/`forwardRef(...)` wrappers,
//! variables and identifiers that lead to any of those.

use crate::analyzers::typescript::parser::{named_children, node_text};
use crate::analyzers::typescript::{Declaration, FileId, Namespace, TypeBinder, TypeId};
use tree_sitter::Node;

const MAX_LOCATE_DEPTH: usize = 32;
const COMPONENT_TYPE_NAMES: [&str; 2] = ["FC", "FunctionComponent"];

/// Syntax shapes the locator distinguishes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeKind {
    Function,
    VariableDeclarator,
    Call,
    Identifier,
    Other,
}

impl NodeKind {
    fn of(node: &Node) -> Self {
        match node.kind() {
            "function_declaration"
            | "function_expression"
            | "function"
            | "arrow_function"
            | "generator_function_declaration"
            | "generator_function" => NodeKind::Function,
            "variable_declarator" => NodeKind::VariableDeclarator,
            "call_expression" => NodeKind::Call,
            "identifier" => NodeKind::Identifier,
            _ => NodeKind::Other,
        }
    }
}

/// Props type of the component defined by `declaration`, if it has one
pub fn find_props_type<'p>(
    binder: &mut TypeBinder<'p>,
    declaration: Declaration<'p>,
) -> Option<TypeId> {
    locate(binder, declaration.file, declaration.node, 0)
}

fn locate<'p>(
    binder: &mut TypeBinder<'p>,
    file: FileId,
    node: Node<'p>,
    depth: usize,
) -> Option<TypeId> {
    if depth > MAX_LOCATE_DEPTH {
        log::debug!("Component lookup exceeded depth at line {}", node.start_position().row + 1);
        return None;
    }

    match NodeKind::of(&node) {
        NodeKind::Function => first_parameter_type(binder, file, node),
        NodeKind::VariableDeclarator => {
            let from_initializer = node
                .child_by_field_name("value")
                .and_then(|value| locate(binder, file, value, depth + 1));
            from_initializer.or_else(|| component_annotation(binder, file, node))
        }
        NodeKind::Call => from_call(binder, file, node, depth),
        NodeKind::Identifier => {
            let program = binder.program();
            let name = node_text(&node, &program.file(file).source);
            let target = program.resolve(file, name, Namespace::Value)?;
            locate(binder, target.file, target.node, depth + 1)
        }
        NodeKind::Other => None,
    }
}

/// Annotated type of a function's first parameter
fn first_parameter_type<'p>(
    binder: &mut TypeBinder<'p>,
    file: FileId,
    function: Node<'p>,
) -> Option<TypeId> {
    let parameters = function.child_by_field_name("parameters")?;
    let first = named_children(&parameters)
        .into_iter()
        .find(|param| matches!(param.kind(), "required_parameter" | "optional_parameter"))?;
    let annotation = first.child_by_field_name("type")?;
    Some(binder.type_at_location(file, annotation))
}

/// `memo(Component)`, `React.forwardRef<Ref, Props>(...)`
fn from_call<'p>(
    binder: &mut TypeBinder<'p>,
    file: FileId,
    call: Node<'p>,
    depth: usize,
) -> Option<TypeId> {
    let source = &binder.program().file(file).source;
    let callee = call.child_by_field_name("function")?;
    let name = match callee.kind() {
        "identifier" => node_text(&callee, source),
        "member_expression" => node_text(&callee.child_by_field_name("property")?, source),
        _ => return None,
    };

    let first_argument = || {
        call.child_by_field_name("arguments")
            .and_then(|arguments| named_children(&arguments).into_iter().next())
    };

    match name {
        "memo" => locate(binder, file, first_argument()?, depth + 1),
        "forwardRef" => {
            let explicit = call
                .child_by_field_name("type_arguments")
                .map(|arguments| named_children(&arguments))
                .filter(|arguments| arguments.len() >= 2)
                .map(|arguments| arguments[1]);
            match explicit {
                Some(props) => Some(binder.type_at_location(file, props)),
                None => locate(binder, file, first_argument()?, depth + 1),
            }
        }
        _ => None,
    }
}

/// `const Button: FC<Props> = ...` or `React.FunctionComponent<Props>`
fn component_annotation<'p>(
    binder: &mut TypeBinder<'p>,
    file: FileId,
    declarator: Node<'p>,
) -> Option<TypeId> {
    let annotation = declarator.child_by_field_name("type")?;
    let generic = named_children(&annotation)
        .into_iter()
        .find(|child| child.kind() == "generic_type")?;

    let source = &binder.program().file(file).source;
    let name = node_text(&generic.child_by_field_name("name")?, source);
    let base = name.rsplit('.').next().unwrap_or(name);
    if !COMPONENT_TYPE_NAMES.contains(&base) {
        return None;
    }

    let props = generic
        .child_by_field_name("type_arguments")
        .and_then(|arguments| named_children(&arguments).into_iter().next())?;
    Some(binder.type_at_location(file, props))
}
