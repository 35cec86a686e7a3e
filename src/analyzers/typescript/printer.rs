//! Canonical display form of bound types
//!
//! Mirrors the way TypeScript prints types in diagnostics: named types print
//! their name, string literals are double-quoted, a union holding both
//! boolean literals prints `boolean` in their place.

use super::types::{ObjectType, Signature, TupleElement, TypeData, TypeId, TypeTable};

const MAX_PRINT_DEPTH: usize = 24;

/// Print a type in its canonical form
pub fn type_to_string(table: &TypeTable, id: TypeId) -> String {
    let mut out = String::new();
    write_type(table, id, &mut out, 0);
    out
}

fn write_type(table: &TypeTable, id: TypeId, out: &mut String, depth: usize) {
    if let Some(alias) = table.alias(id) {
        out.push_str(&alias.name);
        return;
    }
    write_data(table, id, out, depth);
}

fn write_data(table: &TypeTable, id: TypeId, out: &mut String, depth: usize) {
    if depth > MAX_PRINT_DEPTH {
        out.push_str("...");
        return;
    }

    match table.data(id) {
        TypeData::Primitive(p) => out.push_str(p.keyword()),
        TypeData::StringLiteral(value) => {
            out.push('"');
            out.push_str(value);
            out.push('"');
        }
        TypeData::NumberLiteral(value) => out.push_str(value),
        TypeData::BooleanLiteral(value) => out.push_str(if *value { "true" } else { "false" }),
        TypeData::Union(parts) => write_union(table, parts, out, depth),
        TypeData::Intersection(parts) => {
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    out.push_str(" & ");
                }
                write_operand(table, *part, out, depth, true);
            }
        }
        TypeData::Array(element) => {
            write_operand(table, *element, out, depth, true);
            out.push_str("[]");
        }
        TypeData::Tuple(elements) => write_tuple(table, elements, out, depth),
        TypeData::Object(object) => write_object(table, object, out, depth),
        TypeData::Function(signature) => write_signature(table, signature, out, depth),
        TypeData::Enum { name, .. } => out.push_str(name),
        TypeData::TypeParameter(name) => out.push_str(name),
        TypeData::Reference { name, args } => {
            out.push_str(name);
            if !args.is_empty() {
                out.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type(table, *arg, out, depth + 1);
                }
                out.push('>');
            }
        }
        TypeData::Pending => out.push_str("any"),
    }
}

fn write_union(table: &TypeTable, parts: &[TypeId], out: &mut String, depth: usize) {
    let has_true = parts
        .iter()
        .any(|p| matches!(table.data(*p), TypeData::BooleanLiteral(true)));
    let has_false = parts
        .iter()
        .any(|p| matches!(table.data(*p), TypeData::BooleanLiteral(false)));
    let collapse_boolean = has_true && has_false;

    let mut first = true;
    let mut boolean_written = false;
    for part in parts {
        let is_boolean_literal = matches!(table.data(*part), TypeData::BooleanLiteral(_));
        if collapse_boolean && is_boolean_literal {
            if boolean_written {
                continue;
            }
            boolean_written = true;
            if !first {
                out.push_str(" | ");
            }
            out.push_str("boolean");
            first = false;
            continue;
        }
        if !first {
            out.push_str(" | ");
        }
        write_operand(table, *part, out, depth, false);
        first = false;
    }
}

/// Write a constituent of a compound type, parenthesizing where precedence requires
fn write_operand(table: &TypeTable, id: TypeId, out: &mut String, depth: usize, tight: bool) {
    let needs_parens = table.alias(id).is_none()
        && match table.data(id) {
            TypeData::Function(_) => true,
            TypeData::Object(object) => is_function_like(object),
            TypeData::Union(_) | TypeData::Intersection(_) => tight,
            _ => false,
        };

    if needs_parens {
        out.push('(');
        write_type(table, id, out, depth + 1);
        out.push(')');
    } else {
        write_type(table, id, out, depth + 1);
    }
}

fn is_function_like(object: &ObjectType) -> bool {
    object.name.is_none() && object.members.is_empty() && object.call_signatures.len() == 1
}

fn write_tuple(table: &TypeTable, elements: &[TupleElement], out: &mut String, depth: usize) {
    out.push('[');
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if element.rest {
            out.push_str("...");
        }
        write_type(table, element.ty, out, depth + 1);
        if element.optional {
            out.push('?');
        }
    }
    out.push(']');
}

fn write_object(table: &TypeTable, object: &ObjectType, out: &mut String, depth: usize) {
    if let Some(name) = &object.name {
        out.push_str(name);
        return;
    }
    if is_function_like(object) {
        write_signature(table, &object.call_signatures[0], out, depth);
        return;
    }
    if object.members.is_empty() && object.call_signatures.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{ ");
    for signature in &object.call_signatures {
        write_parameters(table, signature, out, depth);
        out.push_str(": ");
        write_type(table, signature.return_type, out, depth + 1);
        out.push_str("; ");
    }
    for member in &object.members {
        out.push_str(&member.name);
        if member.optional {
            out.push('?');
        }
        out.push_str(": ");
        write_type(table, member.declared, out, depth + 1);
        out.push_str("; ");
    }
    out.push('}');
}

fn write_signature(table: &TypeTable, signature: &Signature, out: &mut String, depth: usize) {
    write_parameters(table, signature, out, depth);
    out.push_str(" => ");
    write_type(table, signature.return_type, out, depth + 1);
}

fn write_parameters(table: &TypeTable, signature: &Signature, out: &mut String, depth: usize) {
    out.push('(');
    for (i, param) in signature.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if param.rest {
            out.push_str("...");
        }
        out.push_str(&param.name);
        if param.optional {
            out.push('?');
        }
        out.push_str(": ");
        write_type(table, param.ty, out, depth + 1);
    }
    out.push(')');
}
