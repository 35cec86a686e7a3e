//! Prop schema data model
//!
//! A [`SchemaMap`] maps a canonical component path (`"forms/Button"`) to the
//! [`SchemaEntry`] extracted for it. Each entry is an ordered list of
//! [`PropDefinition`] trees.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Schema node describing one component property.
///
/// A node carries either nothing beyond its type label, an `options` list
/// (literal enumeration), or a `children` list (object/union breakdown).
/// Never both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PropDefinition>>,
}

impl PropDefinition {
    /// Plain leaf node with a type label only
    pub fn leaf(name: impl Into<String>, type_label: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
            required,
            options: None,
            children: None,
        }
    }

    /// Literal enumeration node
    pub fn with_options(
        name: impl Into<String>,
        type_label: impl Into<String>,
        required: bool,
        options: Vec<String>,
    ) -> Self {
        Self {
            options: Some(options),
            ..Self::leaf(name, type_label, required)
        }
    }

    /// Structural node (object members or union variants)
    pub fn with_children(
        name: impl Into<String>,
        type_label: impl Into<String>,
        required: bool,
        children: Vec<PropDefinition>,
    ) -> Self {
        Self {
            children: Some(children),
            ..Self::leaf(name, type_label, required)
        }
    }
}

/// Extracted props of a single component
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub path: String,
    pub props: Vec<PropDefinition>,
}

/// Path-keyed collection of component schemas.
///
/// Keys are kept sorted so that serializing an unchanged map is byte-identical.
pub type SchemaMap = BTreeMap<String, SchemaEntry>;

/// Compute the canonical schema key of a component file.
///
/// The key is the path relative to `root`, with `/` separators, the source
/// extension removed and a trailing `/index` segment dropped. Returns `None`
/// when `file` does not live under `root`.
pub fn component_key(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let without_ext = [".tsx", ".ts"]
        .iter()
        .find_map(|ext| joined.strip_suffix(ext))
        .unwrap_or(&joined);

    let key = without_ext.strip_suffix("/index").unwrap_or(without_ext);
    Some(key.to_string())
}
