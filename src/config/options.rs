use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TSCONFIG_PATH: &str = "tsconfig.json";
pub const DEFAULT_CONSTANT_NAME: &str = "COMPONENT_PROPS";

fn default_tsconfig_path() -> PathBuf {
    PathBuf::from(DEFAULT_TSCONFIG_PATH)
}

fn default_constant_name() -> String {
    DEFAULT_CONSTANT_NAME.to_string()
}

/// Options of one extraction engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorOptions {
    /// Root directory scanned for components; schema keys are relative to it
    pub source_dir: PathBuf,

    /// Compiler configuration used for module resolution
    #[serde(default = "default_tsconfig_path")]
    pub tsconfig_path: PathBuf,

    /// Log files found, files processed and entries produced
    #[serde(default)]
    pub verbose: bool,

    /// Accepted for compatibility with existing configurations. No secondary
    /// JSON dump is produced; use the `json` output format instead.
    #[serde(default)]
    pub generate_json: bool,

    /// Name of the constant emitted by the `define` output format
    #[serde(default = "default_constant_name")]
    pub constant_name: String,

    /// Glob patterns of files to leave out of a full pass
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

impl ExtractorOptions {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            tsconfig_path: default_tsconfig_path(),
            verbose: false,
            generate_json: false,
            constant_name: default_constant_name(),
            ignore_patterns: Vec::new(),
        }
    }

    /// Fill in values set by a `.propmap.toml` file
    pub fn apply_config(mut self, config: &PropmapConfig) -> Self {
        if let Some(tsconfig) = &config.tsconfig {
            self.tsconfig_path = tsconfig.clone();
        }
        if let Some(name) = &config.constant_name {
            self.constant_name = name.clone();
        }
        if let Some(verbose) = config.verbose {
            self.verbose = verbose;
        }
        if let Some(ignore) = &config.ignore {
            self.ignore_patterns = ignore.patterns.clone();
        }
        self
    }

    pub fn with_tsconfig(mut self, path: impl Into<PathBuf>) -> Self {
        self.tsconfig_path = path.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_constant_name(mut self, name: impl Into<String>) -> Self {
        self.constant_name = name.into();
        self
    }
}

/// Contents of a `.propmap.toml` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropmapConfig {
    /// Path of the compiler configuration
    #[serde(default)]
    pub tsconfig: Option<PathBuf>,

    /// Constant name for the `define` output format
    #[serde(default)]
    pub constant_name: Option<String>,

    #[serde(default)]
    pub verbose: Option<bool>,

    /// Ignore patterns
    #[serde(default)]
    pub ignore: Option<IgnoreConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExtractorOptions::new("src");
        assert_eq!(options.tsconfig_path, PathBuf::from("tsconfig.json"));
        assert_eq!(options.constant_name, "COMPONENT_PROPS");
        assert!(!options.verbose);
        assert!(!options.generate_json);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let options: ExtractorOptions =
            serde_json::from_str(r#"{ "source_dir": "app/ui", "generate_json": true }"#).unwrap();
        assert_eq!(options.source_dir, PathBuf::from("app/ui"));
        assert_eq!(options.tsconfig_path, PathBuf::from("tsconfig.json"));
        assert!(options.generate_json);
    }

    #[test]
    fn test_apply_config_then_override() {
        let config = PropmapConfig {
            tsconfig: Some(PathBuf::from("tsconfig.app.json")),
            constant_name: Some("PROPS".into()),
            verbose: Some(true),
            ignore: Some(IgnoreConfig {
                patterns: vec!["**/legacy/**".into()],
            }),
        };
        let options = ExtractorOptions::new("src")
            .apply_config(&config)
            .with_constant_name("OVERRIDE");

        assert_eq!(options.tsconfig_path, PathBuf::from("tsconfig.app.json"));
        assert_eq!(options.constant_name, "OVERRIDE");
        assert!(options.verbose);
        assert_eq!(options.ignore_patterns, vec!["**/legacy/**".to_string()]);
    }
}
