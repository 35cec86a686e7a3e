//! Tree-sitter front end and node helpers shared by the program loader and
//! the type binder.

use crate::core::{Error, LanguageVariant, Result, TypeScriptAst};
use std::path::Path;
use tree_sitter::{Language as TsLanguage, Node, Parser, Tree};

fn grammar(variant: LanguageVariant) -> TsLanguage {
    match variant {
        LanguageVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        LanguageVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse TypeScript source code into a tree-sitter AST.
///
/// Syntax errors do not fail parsing; tree-sitter recovers and the
/// damaged region simply yields no declarations.
pub fn parse_source(
    content: &str,
    path: &Path,
    variant: LanguageVariant,
) -> Result<TypeScriptAst> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar(variant))
        .map_err(|e| Error::parse(path, format!("Incompatible grammar: {e}")))?;

    let Some(tree) = parser.parse(content, None) else {
        return Err(Error::parse(path, "Parser produced no tree"));
    };

    Ok(TypeScriptAst {
        tree,
        path: path.to_path_buf(),
        source: content.to_string(),
        variant,
    })
}

/// `.tsx` files get the JSX grammar, everything else plain TypeScript
pub fn detect_variant(path: &Path) -> LanguageVariant {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(LanguageVariant::from_extension)
        .unwrap_or(LanguageVariant::TypeScript)
}

pub fn has_parse_errors(tree: &Tree) -> bool {
    tree.root_node().has_error()
}

pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// 1-based line of the node start
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Node text with every run of whitespace collapsed to a single space
pub fn normalized_text(node: &Node, source: &str) -> String {
    node_text(node, source)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip one pair of matching quote characters from a string literal
pub fn unquote(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && matches!(first, b'"' | b'\'' | b'`') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Named children of a node, skipping comments
pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Whether a node has an anonymous child token with the given text (`?`, `default`)
pub fn has_token(node: &Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}
