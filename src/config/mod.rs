//! Configuration
//!
//! Three sources feed an [`ExtractorOptions`]: built-in defaults, an optional
//! `.propmap.toml` found by walking up from the working directory, and
//! command-line flags (highest precedence). Module resolution settings come
//! from the project's `tsconfig.json`.

mod loader;
mod options;
pub mod tsconfig;

pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path, parse_config,
    CONFIG_FILE_NAME,
};
pub use options::{
    ExtractorOptions, IgnoreConfig, PropmapConfig, DEFAULT_CONSTANT_NAME, DEFAULT_TSCONFIG_PATH,
};
pub use tsconfig::{load_compiler_options, parse_compiler_options, CompilerOptions, PathMapping};
