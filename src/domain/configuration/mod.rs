mod document;
mod object_path;
mod parse;

pub use document::{ColumnSpec, DataConfiguration, EXPECTED_KEYS, HeaderRow};
pub use object_path::split_object_path;
pub use parse::{DocumentFormat, RawDocument, parse_document};
