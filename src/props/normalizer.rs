//! Union normalization
//!
//! A union prop is one of four shapes once `undefined` and `null` are
//! stripped: a boolean, an enumeration of literals, a single wrapped type, or
//! a genuine mix of variants.

use crate::analyzers::typescript::{LiteralValue, TypeChecker, TypeId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnionShape {
    /// Exactly `true | false`
    Boolean,
    /// Literal values, sorted
    Literals(Vec<String>),
    /// One non-literal variant; the prop behaves as that type
    Single(TypeId),
    /// Remaining variants, intrinsic types first, the rest in declaration
    /// order (possibly none)
    Mixed(Vec<TypeId>),
}

pub fn normalize_union<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> UnionShape {
    let variants: Vec<TypeId> = checker
        .union_types(ty)
        .into_iter()
        .filter(|variant| !checker.is_nullish(*variant))
        .collect();

    let (literals, others): (Vec<TypeId>, Vec<TypeId>) = variants
        .iter()
        .partition(|variant| checker.is_literal(**variant));

    if !literals.is_empty() && others.is_empty() {
        let values: Vec<String> = literals
            .iter()
            .map(|literal| literal_text(checker, *literal))
            .collect();

        let all_boolean = literals.iter().all(|t| checker.is_boolean_literal(*t));
        if literals.len() == 2
            && all_boolean
            && values.iter().any(|v| v == "true")
            && values.iter().any(|v| v == "false")
        {
            return UnionShape::Boolean;
        }

        let mut options: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
        options.sort();
        return UnionShape::Literals(options);
    }

    if literals.is_empty() && others.len() == 1 {
        return UnionShape::Single(others[0]);
    }

    let mut variants = variants;
    variants.sort_by_key(|variant| checker.intrinsic_rank(*variant).unwrap_or(u8::MAX));
    UnionShape::Mixed(variants)
}

/// Option value of a literal type
pub fn literal_text<C: TypeChecker + ?Sized>(checker: &C, ty: TypeId) -> String {
    match checker.literal_value(ty) {
        Some(LiteralValue::String(value)) => value,
        Some(LiteralValue::Number(value)) => value,
        Some(LiteralValue::Boolean(value)) => value.to_string(),
        None => strip_quotes(&cleanup_type_string(&checker.type_to_string(ty))).to_string(),
    }
}

/// Drop framework namespace prefixes from a display string
pub fn cleanup_type_string(display: &str) -> String {
    let mut cleaned = match display.strip_prefix("React.") {
        Some(rest) => rest.to_string(),
        None => display.to_string(),
    };
    if cleaned.contains("JSX.") {
        cleaned = cleaned.replacen("JSX.", "", 1);
    }
    cleaned
}

fn strip_quotes(text: &str) -> &str {
    let is_quote = |c: char| c == '"' || c == '\'';
    let text = text.strip_prefix(is_quote).unwrap_or(text);
    text.strip_suffix(is_quote).unwrap_or(text)
}
