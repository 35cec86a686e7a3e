pub mod ast;
pub mod errors;
pub mod schema;

pub use ast::{LanguageVariant, TypeScriptAst};
pub use errors::{Error, Result};
pub use schema::{component_key, PropDefinition, SchemaEntry, SchemaMap};
