pub mod configuration;
pub mod connection;
pub mod error;
pub mod logging;

pub use configuration::{
    ColumnSpec, DataConfiguration, DocumentFormat, EXPECTED_KEYS, HeaderRow, RawDocument,
    parse_document, split_object_path,
};
pub use connection::{ConnectionString, Credential, ObjectLocation};
pub use error::{AppError, SchemaError};
pub use logging::{LogLevel, Logger};
