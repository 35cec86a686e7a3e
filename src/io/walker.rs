use crate::core::{Error, Result};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};

pub const COMPONENT_EXTENSION: &str = ".tsx";
const EXCLUDED_SUFFIXES: [&str; 3] = [".stories.tsx", ".test.tsx", ".spec.tsx"];
const NODE_MODULES: &str = "node_modules";

/// Recursively discovers component source files under a root directory
pub struct FileWalker {
    root: PathBuf,
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// All component files, sorted by path.
    ///
    /// An unreadable root or subdirectory is an error.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let patterns = compile_ignore_patterns(&self.ignore_patterns)?;

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .filter_entry(|entry| entry.file_name() != NODE_MODULES)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| {
                Error::External(anyhow::Error::new(e).context(format!(
                    "Failed to read source directory {}",
                    self.root.display()
                )))
            })?;
            let path = entry.path();

            if path.is_file() && self.should_process(path, &patterns) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn should_process(&self, path: &Path, patterns: &[glob::Pattern]) -> bool {
        is_component_source(path) && !is_ignored(path, patterns)
    }
}

pub fn compile_ignore_patterns(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|pattern| glob::Pattern::new(pattern).map_err(Error::from))
        .collect()
}

/// Whether any ignore pattern matches the full path
pub fn is_ignored(path: &Path, patterns: &[glob::Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    patterns.iter().any(|pattern| pattern.matches(&path_str))
}

/// A `.tsx` file that is not a story, test or spec
pub fn is_component_source(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    name.ends_with(COMPONENT_EXTENSION) && !EXCLUDED_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Whether a changed file is one a full walk of `root` would have found
pub fn is_watched_change(path: &Path, root: &Path, patterns: &[glob::Pattern]) -> bool {
    path.starts_with(root)
        && is_component_source(path)
        && !path
            .components()
            .any(|c| c == Component::Normal(NODE_MODULES.as_ref()))
        && !is_ignored(path, patterns)
}

pub fn find_component_files(root: &Path, ignore_patterns: Vec<String>) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf())
        .with_ignore_patterns(ignore_patterns)
        .walk()
}
