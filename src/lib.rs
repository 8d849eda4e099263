//! dataconf: fetch data-description documents from blob storage and validate them
//! into typed descriptions of how a tabular file should be read.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api;
pub use app::api::{InspectReport, ObjectRef, delete, download, inspect, upload};
pub use domain::{
    AppError, ColumnSpec, ConnectionString, Credential, DataConfiguration, DocumentFormat, HeaderRow,
    LogLevel, ObjectLocation, SchemaError, parse_document, split_object_path,
};
pub use ports::RemoteObjectClient;
