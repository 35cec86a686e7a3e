use crate::core::{Error, Result, SchemaMap};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON object keyed by component path
    #[default]
    Json,
    /// `const <NAME> = <json>;` for inclusion in a bundle
    Define,
}

pub trait OutputWriter {
    fn write_schema(&mut self, schema: &SchemaMap) -> Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_schema(&mut self, schema: &SchemaMap) -> Result<()> {
        let json = serde_json::to_string_pretty(schema)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct DefineWriter<W: Write> {
    writer: W,
    constant_name: String,
}

impl<W: Write> DefineWriter<W> {
    pub fn new(writer: W, constant_name: impl Into<String>) -> Self {
        Self {
            writer,
            constant_name: constant_name.into(),
        }
    }
}

impl<W: Write> OutputWriter for DefineWriter<W> {
    fn write_schema(&mut self, schema: &SchemaMap) -> Result<()> {
        let json = serde_json::to_string(schema)?;
        writeln!(self.writer, "const {} = {};", self.constant_name, json)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer<'w>(
    format: OutputFormat,
    writer: Box<dyn Write + 'w>,
    constant_name: &str,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Define => Box::new(DefineWriter::new(writer, constant_name)),
    }
}

/// Render a schema map in the given format
pub fn render(schema: &SchemaMap, format: OutputFormat, constant_name: &str) -> Result<String> {
    let mut buffer = Vec::new();
    create_writer(format, Box::new(&mut buffer), constant_name).write_schema(schema)?;
    String::from_utf8(buffer).map_err(|e| Error::External(e.into()))
}

/// Write a schema map to `path`, or to stdout when no path is given
pub fn write_output(
    schema: &SchemaMap,
    format: OutputFormat,
    constant_name: &str,
    path: Option<&Path>,
) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::file_system("Failed to create output directory", parent, e))?;
            }
            let file = fs::File::create(path)
                .map_err(|e| Error::file_system("Failed to create output file", path, e))?;
            create_writer(format, Box::new(std::io::BufWriter::new(file)), constant_name)
                .write_schema(schema)
        }
        None => {
            let stdout = std::io::stdout();
            create_writer(format, Box::new(stdout.lock()), constant_name).write_schema(schema)
        }
    }
}

/// Load a schema map previously written in the `json` format.
///
/// A missing file yields an empty map.
pub fn load_schema(path: &Path) -> Result<SchemaMap> {
    if !path.exists() {
        log::debug!("No existing schema at {}", path.display());
        return Ok(SchemaMap::new());
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read schema file", path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PropDefinition, SchemaEntry};
    use tempfile::TempDir;

    fn sample() -> SchemaMap {
        let mut schema = SchemaMap::new();
        schema.insert(
            "Button".into(),
            SchemaEntry {
                path: "Button".into(),
                props: vec![PropDefinition::leaf("disabled", "boolean", false)],
            },
        );
        schema
    }

    #[test]
    fn test_render_define() {
        let out = render(&sample(), OutputFormat::Define, "COMPONENT_PROPS").unwrap();
        assert_eq!(
            out,
            "const COMPONENT_PROPS = {\"Button\":{\"path\":\"Button\",\"props\":[{\"name\":\"disabled\",\"type\":\"boolean\",\"required\":false}]}};\n"
        );
    }

    #[test]
    fn test_render_json_is_stable() {
        let first = render(&sample(), OutputFormat::Json, "X").unwrap();
        let second = render(&sample(), OutputFormat::Json, "X").unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("{\n  \"Button\": {"));
    }

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("props.json");
        write_output(&sample(), OutputFormat::Json, "X", Some(&path)).unwrap();
        assert_eq!(load_schema(&path).unwrap(), sample());
    }

    #[test]
    fn test_load_missing_schema_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load_schema(&dir.path().join("none.json")).unwrap().is_empty());
    }
}
