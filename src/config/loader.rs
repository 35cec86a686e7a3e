use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::options::PropmapConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".propmap.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

pub fn parse_config(contents: &str) -> Result<PropmapConfig> {
    toml::from_str::<PropmapConfig>(contents)
        .map_err(|e| Error::configuration(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))
}

/// Config stored at exactly `config_path`.
///
/// A missing file is silently skipped; an unreadable or malformed one is
/// reported and skipped.
pub fn load_config_from_path(config_path: &Path) -> Option<PropmapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Ignoring unreadable {}: {e}", config_path.display());
            return None;
        }
    };

    parse_config(&contents)
        .inspect(|_| log::debug!("Using options from {}", config_path.display()))
        .inspect_err(|e| log::warn!("{e}. Using defaults."))
        .ok()
}

/// `start` and its parents, nearest first, at most `max_depth` entries
pub fn directory_ancestors(start: &Path, max_depth: usize) -> Vec<PathBuf> {
    start
        .ancestors()
        .take(max_depth)
        .map(Path::to_path_buf)
        .collect()
}

/// Nearest `.propmap.toml` at or above `start`, or defaults
pub fn load_config_from(start: &Path) -> PropmapConfig {
    let found = directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .into_iter()
        .find_map(|dir| load_config_from_path(&dir.join(CONFIG_FILE_NAME)));

    found.unwrap_or_else(|| {
        log::debug!("No {CONFIG_FILE_NAME} above {}", start.display());
        PropmapConfig::default()
    })
}

/// Nearest `.propmap.toml` at or above the working directory
pub fn load_config() -> PropmapConfig {
    std::env::current_dir()
        .inspect_err(|e| log::warn!("Cannot determine working directory: {e}"))
        .map(|cwd| load_config_from(&cwd))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let config = parse_config(indoc! {r#"
            tsconfig = "tsconfig.app.json"
            constant_name = "UI_PROPS"

            [ignore]
            patterns = ["**/legacy/**"]
        "#})
        .unwrap();

        assert_eq!(config.tsconfig, Some(PathBuf::from("tsconfig.app.json")));
        assert_eq!(config.constant_name.as_deref(), Some("UI_PROPS"));
        assert_eq!(config.verbose, None);
        assert_eq!(config.ignore.unwrap().patterns, vec!["**/legacy/**"]);
    }

    #[test]
    fn test_parse_config_rejects_bad_toml() {
        let result = parse_config("tsconfig = ");
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_directory_ancestors_is_bounded() {
        let ancestors: Vec<PathBuf> = directory_ancestors(Path::new("/a/b/c"), 2);
        assert_eq!(ancestors, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }

    #[test]
    fn test_load_config_from_parent_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("packages").join("ui");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "verbose = true\n").unwrap();

        let config = load_config_from(&nested);
        assert_eq!(config.verbose, Some(true));
    }

    #[test]
    fn test_malformed_config_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "verbose = \"yes\"\n").unwrap();
        assert_eq!(load_config_from(dir.path()), PropmapConfig::default());
    }
}
