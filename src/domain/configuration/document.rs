//! Validated data configuration describing how a tabular file should be read.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};

use super::object_path::split_object_path;
use super::parse::{DocumentFormat, RawDocument, parse_document};
use crate::domain::{AppError, LogLevel, Logger, SchemaError};
use crate::ports::RemoteObjectClient;

/// Top-level keys a configuration document must carry, no more and no less.
pub const EXPECTED_KEYS: [&str; 4] = ["version", "header", "file_format", "columns"];

/// One declared column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtype: Option<String>,
}

/// Header convention for the described file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRow {
    /// Column names are taken from the first row.
    Infer,
    /// The file has no header row.
    Absent,
}

impl HeaderRow {
    /// Zero-based row holding column names, if any.
    pub fn row_index(&self) -> Option<usize> {
        match self {
            HeaderRow::Infer => Some(0),
            HeaderRow::Absent => None,
        }
    }
}

/// Schema-validated configuration plus the provenance of the object it came from.
#[derive(Debug, Clone)]
pub struct DataConfiguration {
    version: String,
    header: bool,
    file_format: String,
    columns: Vec<ColumnSpec>,
    source: String,
    table_name: String,
}

impl DataConfiguration {
    /// Validate a raw document and wrap it.
    ///
    /// Checks run in order and stop at the first failure: the top-level key set,
    /// then field types and column names, then the distinct column count.
    pub fn new(
        raw: RawDocument,
        source: impl Into<String>,
        table_name: impl Into<String>,
        log_level: LogLevel,
    ) -> Result<Self, AppError> {
        let logger = Logger::new("config", log_level);

        let map = match raw {
            Value::Object(map) => map,
            other => {
                return Err(SchemaError::MalformedDocument(format!(
                    "expected a mapping at the top level, found {}",
                    value_kind(&other)
                ))
                .into());
            }
        };

        check_keys(&map, &logger)?;

        let dto: dto::DocumentDto = serde_json::from_value(Value::Object(map))
            .map_err(|e| SchemaError::MalformedDocument(e.to_string()))?;
        let (version, header, file_format, columns) = dto.into_parts()?;

        check_distinct_columns(&columns, &logger)?;

        let config = Self {
            version,
            header,
            file_format,
            columns,
            source: source.into(),
            table_name: table_name.into(),
        };
        logger.debug(format_args!("Configuration: {:?}", config));
        Ok(config)
    }

    /// Download, parse and validate the configuration stored at `object_path`.
    ///
    /// `source` and `table_name` are the parent and final segment of `object_path`.
    pub fn from_client<C: RemoteObjectClient + ?Sized>(
        client: &C,
        object_path: &str,
        log_level: LogLevel,
    ) -> Result<Self, AppError> {
        let logger = Logger::new("config", log_level);

        let content = client.download_bytes()?;
        logger.debug(format_args!("Read {} bytes for {}", content.len(), object_path));

        let raw = parse_document(&content, DocumentFormat::from_path(object_path))?;
        let (source, table_name) = split_object_path(object_path);

        Self::new(raw, source, table_name, log_level)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn file_format(&self) -> &str {
        &self.file_format
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Declared dtypes keyed by column name. Columns without a dtype are omitted.
    pub fn column_dtypes(&self) -> BTreeMap<&str, &str> {
        self.columns
            .iter()
            .filter_map(|c| c.dtype.as_deref().map(|dtype| (c.name.as_str(), dtype)))
            .collect()
    }

    pub fn header(&self) -> HeaderRow {
        if self.header { HeaderRow::Infer } else { HeaderRow::Absent }
    }
}

fn check_keys(map: &Map<String, Value>, logger: &Logger) -> Result<(), SchemaError> {
    let missing: Vec<String> = EXPECTED_KEYS
        .iter()
        .filter(|key| !map.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    let unexpected: Vec<String> =
        map.keys().filter(|key| !EXPECTED_KEYS.contains(&key.as_str())).cloned().collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }

    logger.error(format_args!("Missing keys: {:?}, unexpected keys: {:?}", missing, unexpected));
    Err(SchemaError::MissingOrExtraKeys { missing, unexpected })
}

fn check_distinct_columns(columns: &[ColumnSpec], logger: &Logger) -> Result<(), SchemaError> {
    let distinct: BTreeSet<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    if distinct.len() >= 2 {
        return Ok(());
    }

    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    logger.error(format_args!("Column names in file: {:?}", names));
    logger.error(format_args!("Distinct column names: {:?}", distinct));
    Err(SchemaError::InsufficientDistinctColumns { found: distinct.len() })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

mod dto {
    use serde::Deserialize;
    use serde_json::Value;

    use super::ColumnSpec;
    use crate::domain::SchemaError;

    #[derive(Debug, Deserialize)]
    pub struct DocumentDto {
        pub version: Scalar,
        pub header: Value,
        pub file_format: String,
        pub columns: Option<Vec<ColumnDto>>,
    }

    /// YAML reads `version: 1.0` or `name: 2020` as numbers; keep their text either way.
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    impl From<Scalar> for String {
        fn from(scalar: Scalar) -> Self {
            match scalar {
                Scalar::Text(text) => text,
                Scalar::Number(number) => number.to_string(),
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct ColumnDto {
        #[serde(default)]
        pub name: Option<Scalar>,
        #[serde(default)]
        pub dtype: Option<String>,
    }

    /// Empty, zero, null and false values mean "no header"; anything else means one.
    pub fn truthy(value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            Value::String(text) => !text.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }

    impl DocumentDto {
        pub fn into_parts(self) -> Result<(String, bool, String, Vec<ColumnSpec>), SchemaError> {
            let columns = self
                .columns
                .unwrap_or_default()
                .into_iter()
                .enumerate()
                .map(|(index, column)| {
                    let name = column.name.ok_or(SchemaError::ColumnNameMissing { index })?;
                    Ok(ColumnSpec { name: name.into(), dtype: column.dtype })
                })
                .collect::<Result<Vec<_>, SchemaError>>()?;

            Ok((self.version.into(), truthy(&self.header), self.file_format, columns))
        }
    }
}
