// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod io;
pub mod props;

// Re-export commonly used types
pub use crate::core::{Error, PropDefinition, Result, SchemaEntry, SchemaMap};

pub use crate::config::ExtractorOptions;

pub use crate::engine::Engine;

pub use crate::io::output::{render, OutputFormat};

pub use crate::props::{extract_props, find_props_type, process_source_file};
