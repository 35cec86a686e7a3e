//! Extraction engine
//!
//! An [`Engine`] owns the schema map for the lifetime of a build. The first
//! [`Engine::build`] runs a full pass over the source directory; later
//! [`Engine::update`] calls re-process changed files and overwrite their
//! entries. Entries of deleted or renamed components are not removed.

use crate::analyzers::typescript::{normalize_path, Program, TypeBinder};
use crate::config::{load_compiler_options, ExtractorOptions};
use crate::core::{Error, Result, SchemaMap};
use crate::io::walker::{compile_ignore_patterns, find_component_files, is_watched_change};
use crate::props::process_source_file;
use std::path::{Path, PathBuf};

pub struct Engine {
    options: ExtractorOptions,
    schema: SchemaMap,
    has_run: bool,
}

impl Engine {
    pub fn new(options: ExtractorOptions) -> Self {
        Self::with_schema(options, SchemaMap::new())
    }

    /// Start from a previously produced schema map
    pub fn with_schema(options: ExtractorOptions, schema: SchemaMap) -> Self {
        Self {
            options,
            schema,
            has_run: false,
        }
    }

    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    pub fn schema(&self) -> &SchemaMap {
        &self.schema
    }

    pub fn into_schema(self) -> SchemaMap {
        self.schema
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    fn log(&self, message: impl AsRef<str>) {
        if self.options.verbose {
            log::info!("[propmap] {}", message.as_ref());
        }
    }

    fn source_root(&self) -> Result<PathBuf> {
        let root = std::path::absolute(&self.options.source_dir).map_err(|e| {
            Error::file_system("Failed to resolve source directory", &self.options.source_dir, e)
        })?;
        Ok(normalize_path(&root))
    }

    /// Full pass over every component under the source directory.
    ///
    /// Runs once per engine; later calls return `Ok(0)` without work.
    /// Returns the number of schema entries produced.
    pub fn build(&mut self) -> Result<usize> {
        if self.has_run {
            return Ok(0);
        }

        let root = self.source_root()?;
        let files = find_component_files(&root, self.options.ignore_patterns.clone())?;
        self.log(format!("Found {} UI components to process", files.len()));

        let mut processed = 0;
        if !files.is_empty() {
            processed = self.process_files(&root, &files)?;
            self.log(format!("Processed {processed} components in build mode"));
        }

        self.has_run = true;
        Ok(processed)
    }

    /// Incremental pass over changed files.
    ///
    /// Only files a full walk would pick up are processed: files outside the
    /// source directory, non-component files, files matching an ignore
    /// pattern and files that no longer exist are skipped.
    pub fn update(&mut self, changed: &[PathBuf]) -> Result<usize> {
        let root = self.source_root()?;
        let patterns = compile_ignore_patterns(&self.options.ignore_patterns)?;
        let mut files = Vec::new();
        for path in changed {
            let path = std::path::absolute(path)
                .map(|p| normalize_path(&p))
                .map_err(|e| Error::file_system("Failed to resolve changed file", path, e))?;
            if !is_watched_change(&path, &root, &patterns) {
                continue;
            }
            if !path.is_file() {
                log::debug!("Skipping missing file {}", path.display());
                continue;
            }
            if !files.contains(&path) {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Ok(0);
        }

        let listing: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
        self.log(format!("Processing changed files:\n{}", listing.join("\n")));
        let processed = self.process_files(&root, &files)?;
        self.log(format!("Updated {processed} components in watch mode"));
        Ok(processed)
    }

    fn process_files(&mut self, root: &Path, files: &[PathBuf]) -> Result<usize> {
        let compiler_options = load_compiler_options(&self.options.tsconfig_path)?;
        let program = Program::load(files, &compiler_options)?;
        log::debug!(
            "Loaded {} source files for {} components",
            program.file_count(),
            files.len()
        );

        let mut binder = TypeBinder::new(&program);
        let mut processed = 0;

        for path in files {
            let Some(file) = program.file_id(path) else {
                continue;
            };
            if let Some(entry) = process_source_file(&mut binder, file, root) {
                self.log(format!("Processed {} ({} props)", entry.path, entry.props.len()));
                self.schema.insert(entry.path.clone(), entry);
                processed += 1;
            }
        }

        Ok(processed)
    }
}
