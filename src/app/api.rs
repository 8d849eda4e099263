//! API Facade for the application.
//!
//! Each function binds an `HttpBlobClient` to one object and runs a command against it.

use std::path::Path;

use crate::adapters::HttpBlobClient;
use crate::app::commands::{inspect, transfer};

pub use crate::app::commands::inspect::InspectReport;
pub use crate::domain::{AppError, DataConfiguration, LogLevel};

/// Remote object addressed by connection string, container and path.
#[derive(Debug, Clone, Copy)]
pub struct ObjectRef<'a> {
    pub connection_string: &'a str,
    pub container: &'a str,
    pub path: &'a str,
}

impl ObjectRef<'_> {
    fn client(&self, log_level: LogLevel) -> Result<HttpBlobClient, AppError> {
        HttpBlobClient::new(self.connection_string, self.container, self.path, log_level)
    }
}

/// Fetch and validate the configuration stored at `object`.
pub fn inspect(object: ObjectRef<'_>, log_level: LogLevel) -> Result<DataConfiguration, AppError> {
    let client = object.client(log_level)?;
    inspect::execute(&client, log_level)
}

/// Save the object to `local_path`. Returns the number of bytes written.
pub fn download(
    object: ObjectRef<'_>,
    local_path: &Path,
    log_level: LogLevel,
) -> Result<u64, AppError> {
    let client = object.client(log_level)?;
    transfer::download(&client, local_path)
}

/// Store `local_path` as the object's content. Returns the number of bytes sent.
pub fn upload(
    object: ObjectRef<'_>,
    local_path: &Path,
    overwrite: bool,
    log_level: LogLevel,
) -> Result<u64, AppError> {
    let client = object.client(log_level)?;
    transfer::upload(&client, local_path, overwrite)
}

/// Remove the object.
pub fn delete(object: ObjectRef<'_>, log_level: LogLevel) -> Result<(), AppError> {
    let client = object.client(log_level)?;
    transfer::delete(&client)
}
