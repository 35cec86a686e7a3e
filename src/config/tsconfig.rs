//! Compiler configuration (`tsconfig.json`) loading
//!
//! Only the module resolution settings matter for prop extraction:
//! `compilerOptions.baseUrl` and `compilerOptions.paths`. Everything else in
//! the file is accepted and ignored.

use crate::core::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Module resolution settings taken from a tsconfig file
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Absolute-import root, already joined onto the config directory
    pub base_url: Option<PathBuf>,
    /// `paths` mappings in declaration order
    pub paths: Vec<PathMapping>,
    /// Directory holding the tsconfig file
    pub config_dir: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathMapping {
    pub pattern: String,
    pub targets: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    #[serde(default)]
    compiler_options: RawCompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    base_url: Option<String>,
    #[serde(default)]
    paths: BTreeMap<String, Vec<String>>,
}

impl CompilerOptions {
    /// Candidate base paths (without extension) for a non-relative specifier
    pub fn candidates(&self, specifier: &str) -> Vec<PathBuf> {
        let mapping_root = self.base_url.as_deref().unwrap_or(&self.config_dir);
        let mut candidates = Vec::new();

        for mapping in &self.paths {
            let Some(captured) = match_pattern(&mapping.pattern, specifier) else {
                continue;
            };
            for target in &mapping.targets {
                let substituted = target.replacen('*', captured, 1);
                candidates.push(mapping_root.join(substituted));
            }
        }

        if let Some(base) = &self.base_url {
            candidates.push(base.join(specifier));
        }

        candidates
    }
}

/// Match a `paths` pattern with at most one `*`, returning the captured part
fn match_pattern<'a>(pattern: &str, specifier: &'a str) -> Option<&'a str> {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            let rest = specifier.strip_prefix(prefix)?;
            let captured = rest.strip_suffix(suffix)?;
            Some(captured)
        }
        None => (pattern == specifier).then_some(""),
    }
}

/// Load compiler options from a tsconfig file.
///
/// A missing or malformed file is a configuration error; the caller is
/// expected to abort the current pass.
pub fn load_compiler_options(path: &Path) -> Result<CompilerOptions> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read tsconfig", path, e))?;
    let config_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    parse_compiler_options(&contents, config_dir)
        .map_err(|e| Error::configuration(format!("{}: {}", path.display(), e)))
}

/// Parse tsconfig contents (JSON with comments and trailing commas)
pub fn parse_compiler_options(contents: &str, config_dir: PathBuf) -> Result<CompilerOptions> {
    let cleaned = strip_trailing_commas(&strip_json_comments(contents));
    let raw: RawTsConfig = serde_json::from_str(&cleaned)?;

    let base_url = raw
        .compiler_options
        .base_url
        .map(|base| config_dir.join(base));
    let paths = raw
        .compiler_options
        .paths
        .into_iter()
        .map(|(pattern, targets)| PathMapping { pattern, targets })
        .collect();

    Ok(CompilerOptions {
        base_url,
        paths,
        config_dir,
    })
}

/// Remove `//` and `/* */` comments outside of string literals
fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Remove commas directly followed (modulo whitespace) by `}` or `]`
fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                i += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }

    out
}
