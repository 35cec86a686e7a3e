#![allow(dead_code)]

use propmap::{Engine, ExtractorOptions, SchemaMap};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a project with a `tsconfig.json` and the given files under it
pub fn project(files: &[(&str, &str)]) -> TempDir {
    project_with_tsconfig("{}", files)
}

pub fn project_with_tsconfig(tsconfig: &str, files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tsconfig.json"), tsconfig).unwrap();
    for (path, content) in files {
        write_file(dir.path(), path, content);
    }
    dir
}

pub fn write_file(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, content).unwrap();
}

pub fn options(dir: &TempDir) -> ExtractorOptions {
    ExtractorOptions::new(dir.path().join("src")).with_tsconfig(dir.path().join("tsconfig.json"))
}

/// Run a full pass over `<dir>/src`
pub fn extract(dir: &TempDir) -> SchemaMap {
    let mut engine = Engine::new(options(dir));
    engine.build().unwrap();
    engine.into_schema()
}
