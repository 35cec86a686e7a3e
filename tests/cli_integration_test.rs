mod common;

use assert_cmd::Command;
use common::{project, write_file};
use indoc::indoc;
use propmap::SchemaMap;
use std::fs;

const CARD: &str = indoc! {"
    interface CardProps {
      title: string;
      tone?: 'info' | 'danger';
    }
    export default function Card(props: CardProps) { return null; }
"};

fn propmap() -> Command {
    let mut cmd = Command::cargo_bin("propmap").unwrap();
    cmd.env_remove("PROPMAP_TSCONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_extract_to_stdout() {
    let dir = project(&[("src/Card.tsx", CARD)]);

    let output = propmap()
        .current_dir(dir.path())
        .args(["extract", "src"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let schema: SchemaMap = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema.len(), 1);
    assert_eq!(schema["Card"].props.len(), 2);
    assert_eq!(
        schema["Card"].props[1].options.as_deref(),
        Some(&["danger".to_string(), "info".to_string()][..])
    );
}

#[test]
fn test_extract_define_format_to_file() {
    let dir = project(&[("src/Card.tsx", CARD)]);
    let out = dir.path().join("generated/props.js");

    propmap()
        .current_dir(dir.path())
        .args(["extract", "src", "-f", "define", "--constant", "CARD_PROPS", "-o"])
        .arg(&out)
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("const CARD_PROPS = {"));
    assert!(written.trim_end().ends_with("};"));
}

#[test]
fn test_update_rewrites_changed_entry() {
    let dir = project(&[("src/Card.tsx", CARD)]);
    let out = dir.path().join("props.json");

    propmap()
        .current_dir(dir.path())
        .args(["extract", "src", "-o"])
        .arg(&out)
        .assert()
        .success();

    write_file(
        dir.path(),
        "src/Card.tsx",
        "export default function Card(props: { title: number }) { return null; }\n",
    );

    propmap()
        .current_dir(dir.path())
        .args(["update", "src", "-o"])
        .arg(&out)
        .arg(dir.path().join("src/Card.tsx"))
        .assert()
        .success();

    let schema: SchemaMap = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let props = &schema["Card"].props;
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].type_label, "number");
}

#[test]
fn test_missing_tsconfig_fails() {
    let dir = project(&[("src/Card.tsx", CARD)]);

    propmap()
        .current_dir(dir.path())
        .args(["extract", "src", "--tsconfig", "missing.json"])
        .assert()
        .failure();
}
