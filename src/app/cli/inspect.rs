//! Inspect command output.

use crate::app::api::{self, InspectReport, ObjectRef};
use crate::domain::{AppError, LogLevel};

pub fn run_inspect(object: ObjectRef<'_>, json: bool, level: LogLevel) -> Result<(), AppError> {
    let config = api::inspect(object, level)?;
    let report = InspectReport::from(&config);

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Io(std::io::Error::other(e)))?;
        println!("{}", text);
        return Ok(());
    }

    println!("✅ {} is valid", object.path);
    println!("source:      {}", report.source);
    println!("table:       {}", report.table_name);
    println!("version:     {}", report.version);
    println!("file_format: {}", report.file_format);
    println!("header:      {}", if report.header_row.is_some() { "infer" } else { "none" });
    println!("columns:");
    for column in &report.columns {
        match &column.dtype {
            Some(dtype) => println!("  - {} ({})", column.name, dtype),
            None => println!("  - {}", column.name),
        }
    }
    Ok(())
}
