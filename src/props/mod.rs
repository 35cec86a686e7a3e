//! Prop schema extraction
//!
//! The pipeline for one file runs [`process_source_file`] →
//! [`find_props_type`] → [`extract_props`], with the classifier and union
//! normalizer applied at every property.

pub mod classifier;
pub mod extractor;
pub mod locator;
pub mod normalizer;
pub mod source;

pub use classifier::{classify, resolve_alias, TypeKind};
pub use extractor::{extract_props, extract_props_with, parse_property, VisitedTypes};
pub use locator::find_props_type;
pub use normalizer::{normalize_union, UnionShape};
pub use source::process_source_file;
