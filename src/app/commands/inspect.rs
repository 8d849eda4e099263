use serde::Serialize;

use crate::domain::{AppError, ColumnSpec, DataConfiguration, LogLevel};
use crate::ports::RemoteObjectClient;

/// Serializable view of a validated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub source: String,
    pub table_name: String,
    pub version: String,
    pub file_format: String,
    pub header_row: Option<usize>,
    pub columns: Vec<ColumnSpec>,
}

impl From<&DataConfiguration> for InspectReport {
    fn from(config: &DataConfiguration) -> Self {
        Self {
            source: config.source().to_string(),
            table_name: config.table_name().to_string(),
            version: config.version().to_string(),
            file_format: config.file_format().to_string(),
            header_row: config.header().row_index(),
            columns: config.columns().to_vec(),
        }
    }
}

/// Load and validate the configuration object the client is bound to.
pub fn execute(
    client: &impl RemoteObjectClient,
    log_level: LogLevel,
) -> Result<DataConfiguration, AppError> {
    let path = client.location().path.clone();
    DataConfiguration::from_client(client, &path, log_level)
}
