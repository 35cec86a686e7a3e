//! Program: a set of parsed source files plus module and symbol resolution
//!
//! A [`Program`] is loaded from root files and pulls in every module those
//! files import (transitively) that resolves to a TypeScript source on disk.
//! Imports that do not resolve (`react`, `next/link`) are external; names
//! imported from them stay opaque to the binder.

use super::parser::{
    detect_variant, has_parse_errors, has_token, named_children, node_text, parse_source, unquote,
};
use crate::config::CompilerOptions;
use crate::core::{Error, Result, TypeScriptAst};
use std::collections::{HashMap, VecDeque};
use std::path::{Component, Path, PathBuf};
use tree_sitter::Node;

const MAX_RESOLUTION_DEPTH: usize = 16;
const SOURCE_SUFFIXES: [&str; 3] = [".tsx", ".ts", ".d.ts"];
const INDEX_FILES: [&str; 3] = ["index.tsx", "index.ts", "index.d.ts"];

/// Index of a file in a [`Program`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(usize);

/// A syntax node together with the file it belongs to
#[derive(Clone, Copy, Debug)]
pub struct Declaration<'p> {
    pub file: FileId,
    pub node: Node<'p>,
}

/// Declaration space a name is looked up in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Namespace {
    Value,
    Type,
}

/// What a top-level name is bound to inside one file
enum Binding<'p> {
    Local(Node<'p>),
    Import {
        module: Option<FileId>,
        name: String,
    },
}

#[derive(Debug, Default)]
pub struct Program {
    files: Vec<TypeScriptAst>,
    index: HashMap<PathBuf, FileId>,
    modules: HashMap<(FileId, String), FileId>,
}

impl Program {
    /// Parse `roots` and every local module reachable through their imports
    pub fn load(roots: &[PathBuf], options: &CompilerOptions) -> Result<Self> {
        let mut program = Program::default();
        let mut queue = VecDeque::new();

        for root in roots {
            let path = normalize_path(root);
            if !program.index.contains_key(&path) {
                let id = program.add_file(path)?;
                queue.push_back(id);
            }
        }

        while let Some(id) = queue.pop_front() {
            let importer = program.files[id.0].path.clone();
            for specifier in module_specifiers(&program.files[id.0]) {
                let Some(path) = resolve_module_path(&importer, &specifier, options) else {
                    log::trace!("External module {} in {}", specifier, importer.display());
                    continue;
                };
                let target = match program.index.get(&path) {
                    Some(existing) => *existing,
                    None => {
                        let added = program.add_file(path)?;
                        queue.push_back(added);
                        added
                    }
                };
                program.modules.insert((id, specifier), target);
            }
        }

        Ok(program)
    }

    /// Build a program from in-memory sources; imports resolve between them only
    pub fn from_sources(sources: &[(PathBuf, String)]) -> Result<Self> {
        let mut program = Program::default();
        for (path, content) in sources {
            let path = normalize_path(path);
            let ast = parse_source(content, &path, detect_variant(&path))?;
            let id = FileId(program.files.len());
            program.files.push(ast);
            program.index.insert(path, id);
        }

        for id in 0..program.files.len() {
            let file = FileId(id);
            let importer = program.files[id].path.clone();
            for specifier in module_specifiers(&program.files[id]) {
                let target = module_base(&importer, &specifier).and_then(|base| {
                    candidate_paths(&base)
                        .into_iter()
                        .find_map(|candidate| program.index.get(&candidate).copied())
                });
                if let Some(target) = target {
                    program.modules.insert((file, specifier), target);
                }
            }
        }

        Ok(program)
    }

    fn add_file(&mut self, path: PathBuf) -> Result<FileId> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::file_system("Failed to read source file", &path, e))?;
        let ast = parse_source(&content, &path, detect_variant(&path))?;
        if has_parse_errors(&ast.tree) {
            log::debug!("Recovered from syntax errors in {}", path.display());
        }
        let id = FileId(self.files.len());
        self.files.push(ast);
        self.index.insert(path, id);
        Ok(id)
    }

    pub fn file(&self, id: FileId) -> &TypeScriptAst {
        &self.files[id.0]
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Look up a loaded file by path
    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.index.get(&normalize_path(path)).copied()
    }

    /// Module an import specifier of `file` resolved to, if it is local
    pub fn resolved_module(&self, file: FileId, specifier: &str) -> Option<FileId> {
        self.modules.get(&(file, specifier.to_string())).copied()
    }

    fn statements(&self, file: FileId) -> Vec<Node<'_>> {
        named_children(&self.files[file.0].tree.root_node())
    }

    fn text<'p>(&'p self, file: FileId, node: &Node) -> &'p str {
        node_text(node, &self.files[file.0].source)
    }

    /// Resolve a name used in `file` to its originating declaration
    pub fn resolve(&self, file: FileId, name: &str, namespace: Namespace) -> Option<Declaration<'_>> {
        self.resolve_at_depth(file, name, namespace, 0)
    }

    fn resolve_at_depth(
        &self,
        file: FileId,
        name: &str,
        namespace: Namespace,
        depth: usize,
    ) -> Option<Declaration<'_>> {
        if depth > MAX_RESOLUTION_DEPTH {
            return None;
        }
        match self.find_binding(file, name, namespace)? {
            Binding::Local(node) => Some(Declaration { file, node }),
            Binding::Import { module, name } => {
                self.resolve_export(module?, &name, namespace, depth + 1)
            }
        }
    }

    /// Find the entity the default export of `file` stands for.
    ///
    /// For `export default <expr>` this is the expression; for
    /// `export default function ...` the declaration; for
    /// `export { x as default }` the declaration of `x`, following re-exports.
    pub fn default_export(&self, file: FileId) -> Option<Declaration<'_>> {
        self.default_export_at_depth(file, Namespace::Value, 0)
    }

    fn default_export_at_depth(
        &self,
        file: FileId,
        namespace: Namespace,
        depth: usize,
    ) -> Option<Declaration<'_>> {
        if depth > MAX_RESOLUTION_DEPTH {
            return None;
        }

        for statement in self.statements(file) {
            if statement.kind() != "export_statement" {
                continue;
            }

            if has_token(&statement, "default") {
                let target = statement
                    .child_by_field_name("declaration")
                    .or_else(|| statement.child_by_field_name("value"));
                return target.map(|node| Declaration { file, node });
            }

            if let Some((local, source)) = self.find_exported_as(file, &statement, "default") {
                return match source {
                    Some(module) => self.resolve_export(module?, &local, namespace, depth + 1),
                    None => self.resolve_at_depth(file, &local, namespace, depth + 1),
                };
            }
        }

        None
    }

    /// Resolve the declaration a module exports under `exported`
    fn resolve_export(
        &self,
        file: FileId,
        exported: &str,
        namespace: Namespace,
        depth: usize,
    ) -> Option<Declaration<'_>> {
        if depth > MAX_RESOLUTION_DEPTH {
            return None;
        }
        if exported == "default" {
            return self.default_export_at_depth(file, namespace, depth + 1);
        }

        let statements = self.statements(file);
        for statement in &statements {
            if statement.kind() != "export_statement" {
                continue;
            }
            if let Some(declaration) = statement.child_by_field_name("declaration") {
                if let Some(node) = self.declares(file, declaration, exported, namespace) {
                    return Some(Declaration { file, node });
                }
            }
            if let Some((local, source)) = self.find_exported_as(file, statement, exported) {
                return match source {
                    Some(module) => self.resolve_export(module?, &local, namespace, depth + 1),
                    None => self.resolve_at_depth(file, &local, namespace, depth + 1),
                };
            }
        }

        // `export * from "./module"`
        for statement in &statements {
            if statement.kind() != "export_statement" || !has_token(statement, "*") {
                continue;
            }
            let Some(module) = self.export_source(file, statement) else {
                continue;
            };
            if let Some(found) = module.and_then(|m| self.resolve_export(m, exported, namespace, depth + 1)) {
                return Some(found);
            }
        }

        // Ambient and implicitly exported declarations
        statements.iter().find_map(|statement| {
            self.declares(file, *statement, exported, namespace)
                .map(|node| Declaration { file, node })
        })
    }

    /// Local name and optional source module of a specifier exported as `exported`
    #[allow(clippy::type_complexity)]
    fn find_exported_as(
        &self,
        file: FileId,
        statement: &Node<'_>,
        exported: &str,
    ) -> Option<(String, Option<Option<FileId>>)> {
        let clause = named_children(statement)
            .into_iter()
            .find(|child| child.kind() == "export_clause")?;

        for specifier in named_children(&clause) {
            if specifier.kind() != "export_specifier" {
                continue;
            }
            let Some(name_node) = specifier.child_by_field_name("name") else {
                continue;
            };
            let local = unquote(self.text(file, &name_node)).to_string();
            let exported_as = specifier
                .child_by_field_name("alias")
                .map(|alias| unquote(self.text(file, &alias)).to_string())
                .unwrap_or_else(|| local.clone());

            if exported_as == exported {
                return Some((local, self.export_source(file, statement)));
            }
        }

        None
    }

    /// Source module of an `export ... from` statement.
    ///
    /// `None` when the statement has no `from` clause, `Some(None)` when the
    /// module is external.
    fn export_source(&self, file: FileId, statement: &Node<'_>) -> Option<Option<FileId>> {
        let source = statement.child_by_field_name("source")?;
        let specifier = unquote(self.text(file, &source));
        Some(self.resolved_module(file, specifier))
    }

    fn find_binding<'p>(&'p self, file: FileId, name: &str, namespace: Namespace) -> Option<Binding<'p>> {
        for statement in self.statements(file) {
            match statement.kind() {
                "export_statement" => {
                    if let Some(declaration) = statement.child_by_field_name("declaration") {
                        if let Some(node) = self.declares(file, declaration, name, namespace) {
                            return Some(Binding::Local(node));
                        }
                    }
                }
                "import_statement" => {
                    if let Some(binding) = self.import_binding(file, &statement, name) {
                        return Some(binding);
                    }
                }
                _ => {
                    if let Some(node) = self.declares(file, statement, name, namespace) {
                        return Some(Binding::Local(node));
                    }
                }
            }
        }
        None
    }

    fn import_binding<'p>(&'p self, file: FileId, statement: &Node<'p>, name: &str) -> Option<Binding<'p>> {
        let clause = named_children(statement)
            .into_iter()
            .find(|child| child.kind() == "import_clause")?;
        let module = statement
            .child_by_field_name("source")
            .and_then(|source| self.resolved_module(file, unquote(self.text(file, &source))));

        for part in named_children(&clause) {
            match part.kind() {
                "identifier" if self.text(file, &part) == name => {
                    return Some(Binding::Import {
                        module,
                        name: "default".to_string(),
                    });
                }
                "named_imports" => {
                    for specifier in named_children(&part) {
                        if specifier.kind() != "import_specifier" {
                            continue;
                        }
                        let Some(imported) = specifier.child_by_field_name("name") else {
                            continue;
                        };
                        let imported = unquote(self.text(file, &imported)).to_string();
                        let local = specifier
                            .child_by_field_name("alias")
                            .map(|alias| self.text(file, &alias).to_string())
                            .unwrap_or_else(|| imported.clone());
                        if local == name {
                            return Some(Binding::Import {
                                module,
                                name: imported,
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        None
    }

    /// The node declaring `name` in `namespace`, if `node` declares it
    fn declares<'p>(
        &'p self,
        file: FileId,
        node: Node<'p>,
        name: &str,
        namespace: Namespace,
    ) -> Option<Node<'p>> {
        let named = |n: &Node<'p>| {
            n.child_by_field_name("name")
                .is_some_and(|ident| self.text(file, &ident) == name)
        };

        match (namespace, node.kind()) {
            (_, "ambient_declaration") => named_children(&node)
                .into_iter()
                .find_map(|inner| self.declares(file, inner, name, namespace)),
            (
                Namespace::Value,
                "function_declaration"
                | "generator_function_declaration"
                | "function_signature"
                | "class_declaration"
                | "abstract_class_declaration",
            ) => named(&node).then_some(node),
            (Namespace::Value, "lexical_declaration" | "variable_declaration") => {
                named_children(&node)
                    .into_iter()
                    .filter(|child| child.kind() == "variable_declarator")
                    .find(|declarator| named(declarator))
            }
            (
                Namespace::Type,
                "interface_declaration" | "type_alias_declaration" | "enum_declaration",
            ) => named(&node).then_some(node),
            _ => None,
        }
    }
}

/// Module specifiers referenced by `import ... from` and `export ... from`
fn module_specifiers(ast: &TypeScriptAst) -> Vec<String> {
    named_children(&ast.tree.root_node())
        .into_iter()
        .filter(|statement| matches!(statement.kind(), "import_statement" | "export_statement"))
        .filter_map(|statement| statement.child_by_field_name("source"))
        .map(|source| unquote(node_text(&source, &ast.source)).to_string())
        .collect()
}

/// Extensionless base path of a relative specifier
fn module_base(importer: &Path, specifier: &str) -> Option<PathBuf> {
    if !(specifier.starts_with("./") || specifier.starts_with("../") || specifier == ".") {
        return None;
    }
    let dir = importer.parent().unwrap_or_else(|| Path::new(""));
    Some(normalize_path(&dir.join(specifier)))
}

/// Paths a base path may resolve to, in lookup order
fn candidate_paths(base: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let text = base.to_string_lossy();

    if SOURCE_SUFFIXES.iter().any(|suffix| text.ends_with(suffix)) {
        candidates.push(base.to_path_buf());
    }
    // ESM-style specifiers name the emitted `.js` file
    let stem = text
        .strip_suffix(".js")
        .or_else(|| text.strip_suffix(".jsx"))
        .unwrap_or(&text);
    for suffix in SOURCE_SUFFIXES {
        candidates.push(PathBuf::from(format!("{stem}{suffix}")));
    }
    for index in INDEX_FILES {
        candidates.push(base.join(index));
    }

    candidates
}

/// Resolve a module specifier to a source file on disk
pub fn resolve_module_path(
    importer: &Path,
    specifier: &str,
    options: &CompilerOptions,
) -> Option<PathBuf> {
    let bases = match module_base(importer, specifier) {
        Some(base) => vec![base],
        None => options
            .candidates(specifier)
            .iter()
            .map(|base| normalize_path(base))
            .collect(),
    };

    bases
        .iter()
        .flat_map(|base| candidate_paths(base))
        .find(|candidate| candidate.is_file())
}

/// Lexically normalize a path: drop `.` components and fold `..`
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
