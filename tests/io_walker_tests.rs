use propmap::io::walker::FileWalker;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper function to create a test directory structure
fn create_test_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let base_path = temp_dir.path();

    fs::create_dir_all(base_path.join("src/forms")).unwrap();
    fs::write(base_path.join("src/Button.tsx"), "export default () => null;").unwrap();
    fs::write(base_path.join("src/forms/Select.tsx"), "").unwrap();
    fs::write(base_path.join("src/forms/index.tsx"), "").unwrap();

    // Files that are not components
    fs::write(base_path.join("src/types.ts"), "export interface User {}").unwrap();
    fs::write(base_path.join("src/Button.stories.tsx"), "").unwrap();
    fs::write(base_path.join("src/Button.test.tsx"), "").unwrap();
    fs::write(base_path.join("src/forms/Select.spec.tsx"), "").unwrap();
    fs::write(base_path.join("src/README.md"), "# Readme").unwrap();

    // Dependencies
    fs::create_dir_all(base_path.join("src/node_modules/ui")).unwrap();
    fs::write(base_path.join("src/node_modules/ui/Icon.tsx"), "").unwrap();

    // Hidden and git-ignored files are still components
    fs::create_dir_all(base_path.join("src/.generated")).unwrap();
    fs::write(base_path.join("src/.generated/Icon.tsx"), "").unwrap();
    fs::write(base_path.join("src/.gitignore"), "legacy/\n").unwrap();
    fs::create_dir_all(base_path.join("src/legacy")).unwrap();
    fs::write(base_path.join("src/legacy/Old.tsx"), "").unwrap();

    temp_dir
}

fn relative(root: &std::path::Path, files: Vec<PathBuf>) -> Vec<String> {
    files
        .into_iter()
        .map(|f| {
            f.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_walk_finds_component_files_sorted() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path().join("src");

    let files = FileWalker::new(root.clone()).walk().unwrap();

    assert_eq!(
        relative(&root, files),
        vec![
            ".generated/Icon.tsx",
            "Button.tsx",
            "forms/Select.tsx",
            "forms/index.tsx",
            "legacy/Old.tsx",
        ]
    );
}

#[test]
fn test_walk_applies_ignore_patterns() {
    let temp_dir = create_test_directory();
    let root = temp_dir.path().join("src");

    let files = FileWalker::new(root.clone())
        .with_ignore_patterns(vec!["**/legacy/**".into(), "**/.generated/**".into()])
        .walk()
        .unwrap();

    assert_eq!(
        relative(&root, files),
        vec!["Button.tsx", "forms/Select.tsx", "forms/index.tsx"]
    );
}

#[test]
fn test_invalid_ignore_pattern_is_error() {
    let temp_dir = create_test_directory();
    let result = FileWalker::new(temp_dir.path().join("src"))
        .with_ignore_patterns(vec!["[".into()])
        .walk();
    assert!(matches!(result, Err(propmap::Error::Pattern(_))));
}

#[test]
fn test_missing_root_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = FileWalker::new(temp_dir.path().join("missing")).walk();
    assert!(result.is_err());
}
