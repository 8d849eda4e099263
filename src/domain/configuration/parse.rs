//! Pure parse of raw configuration bytes into a generic document.

use std::fmt;
use std::path::Path;

use crate::domain::SchemaError;

/// Generic, unvalidated document tree.
pub type RawDocument = serde_json::Value;

/// Serialization format of a configuration object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Infer the format from an object path's extension; anything unknown is YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path.as_ref().extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => DocumentFormat::Json,
            Some("toml") => DocumentFormat::Toml,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Parse raw bytes into a generic document.
pub fn parse_document(bytes: &[u8], format: DocumentFormat) -> Result<RawDocument, SchemaError> {
    match format {
        DocumentFormat::Yaml => serde_yaml::from_slice(bytes).map_err(malformed),
        DocumentFormat::Json => serde_json::from_slice(bytes).map_err(malformed),
        DocumentFormat::Toml => {
            let text = std::str::from_utf8(bytes).map_err(malformed)?;
            toml::from_str(text).map_err(malformed)
        }
    }
}

fn malformed(err: impl fmt::Display) -> SchemaError {
    SchemaError::MalformedDocument(err.to_string())
}
