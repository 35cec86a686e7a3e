pub mod output;
pub mod walker;

pub use output::{create_writer, load_schema, render, write_output, OutputFormat, OutputWriter};
pub use walker::{
    compile_ignore_patterns, find_component_files, is_component_source, is_ignored,
    is_watched_change, FileWalker,
};
