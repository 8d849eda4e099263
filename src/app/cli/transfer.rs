//! Download, upload and delete command output.

use std::path::Path;

use crate::app::api::{self, ObjectRef};
use crate::domain::{AppError, LogLevel};

pub fn run_download(object: ObjectRef<'_>, local: &Path, level: LogLevel) -> Result<(), AppError> {
    let bytes = api::download(object, local, level)?;
    println!(
        "✅ Downloaded {}/{} to {} ({} bytes)",
        object.container,
        object.path,
        local.display(),
        bytes
    );
    Ok(())
}

pub fn run_upload(
    object: ObjectRef<'_>,
    local: &Path,
    overwrite: bool,
    level: LogLevel,
) -> Result<(), AppError> {
    let bytes = api::upload(object, local, overwrite, level)?;
    println!(
        "✅ Uploaded {} to {}/{} ({} bytes)",
        local.display(),
        object.container,
        object.path,
        bytes
    );
    Ok(())
}

pub fn run_delete(object: ObjectRef<'_>, level: LogLevel) -> Result<(), AppError> {
    api::delete(object, level)?;
    println!("✅ Deleted {}/{}", object.container, object.path);
    Ok(())
}
