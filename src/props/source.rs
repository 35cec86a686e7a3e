//! Source processing
//!
//! Ties one file's default export to a schema entry keyed by its path under
//! the source root.

use super::extractor::extract_props;
use super::locator::find_props_type;
use crate::analyzers::typescript::{FileId, TypeBinder};
use crate::core::{component_key, SchemaEntry};
use std::path::Path;

/// Extract the schema entry of the component a file default-exports.
///
/// Returns `None` when the file has no default export, the export has no
/// resolvable props type, or the props type has no members.
pub fn process_source_file(
    binder: &mut TypeBinder<'_>,
    file: FileId,
    root: &Path,
) -> Option<SchemaEntry> {
    let program = binder.program();
    let path = &program.file(file).path;
    log::debug!("Processing file: {}", path.display());

    let Some(declaration) = program.default_export(file) else {
        log::debug!("No default export in {}", path.display());
        return None;
    };

    let props_type = find_props_type(binder, declaration)?;
    let props = extract_props(binder.table(), props_type);
    if props.is_empty() {
        return None;
    }

    Some(SchemaEntry {
        path: component_key(root, path)?,
        props,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::typescript::Program;
    use crate::core::PropDefinition;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn process(path: &str, source: &str) -> Option<SchemaEntry> {
        let program = Program::from_sources(&[(PathBuf::from(path), source.to_string())]).unwrap();
        let file = program.file_id(Path::new(path)).unwrap();
        let mut binder = TypeBinder::new(&program);
        process_source_file(&mut binder, file, Path::new("src"))
    }

    #[test]
    fn test_button_component() {
        let entry = process(
            "src/components/Button/index.tsx",
            indoc! {r#"
                import React, { ReactNode } from "react";

                export interface ButtonProps {
                  variant: "primary" | "secondary";
                  size?: "small" | "medium" | "large";
                  disabled?: boolean;
                  onClick: () => void;
                  children: ReactNode;
                }

                const Button = ({ variant, children }: ButtonProps) => <button>{children}</button>;

                export default Button;
            "#},
        )
        .unwrap();

        assert_eq!(entry.path, "components/Button");
        assert_eq!(
            entry.props,
            vec![
                PropDefinition::with_options(
                    "variant",
                    "enum-literal",
                    true,
                    vec!["primary".into(), "secondary".into()]
                ),
                PropDefinition::with_options(
                    "size",
                    "enum-literal",
                    false,
                    vec!["large".into(), "medium".into(), "small".into()]
                ),
                PropDefinition::leaf("disabled", "boolean", false),
                PropDefinition::leaf("onClick", "() => void", true),
                PropDefinition::leaf("children", "ReactNode", true),
            ]
        );
    }

    #[test]
    fn test_no_default_export_is_silent() {
        assert_eq!(
            process("src/util.tsx", "export const Button = (p: { a: string }) => null;"),
            None
        );
    }

    #[test]
    fn test_empty_props_produce_no_entry() {
        assert_eq!(
            process("src/Empty.tsx", "export default function Empty(props: {}) { return null; }"),
            None
        );
    }

    #[test]
    fn test_nested_and_union_props() {
        let entry = process(
            "src/Profile.tsx",
            indoc! {"
                type Status = 'active' | 'away';
                interface User { name: string; status: Status }
                interface ProfileProps { user?: User; width: number | 'auto'; tags: string[] }
                export default function Profile(props: ProfileProps) { return null; }
            "},
        )
        .unwrap();

        assert_eq!(entry.path, "Profile");
        assert_eq!(
            entry.props,
            vec![
                PropDefinition::with_children(
                    "user",
                    "object",
                    false,
                    vec![
                        PropDefinition::leaf("name", "string", true),
                        PropDefinition::with_options(
                            "status",
                            "enum-literal",
                            true,
                            vec!["active".into(), "away".into()]
                        ),
                    ]
                ),
                PropDefinition::with_children(
                    "width",
                    "union",
                    true,
                    vec![
                        PropDefinition::leaf("width", "number", true),
                        PropDefinition::with_options(
                            "width",
                            "enum-literal",
                            true,
                            vec!["auto".into()]
                        ),
                    ]
                ),
                PropDefinition::leaf("tags", "string[]", true),
            ]
        );
    }
}
