use std::fs;
use std::path::Path;

use crate::domain::AppError;
use crate::ports::RemoteObjectClient;

/// Download the object to `local_path` and report the bytes written.
pub fn download(client: &impl RemoteObjectClient, local_path: &Path) -> Result<u64, AppError> {
    client.download_to_file(local_path)?;
    Ok(fs::metadata(local_path)?.len())
}

/// Upload `local_path` and report the bytes sent.
pub fn upload(
    client: &impl RemoteObjectClient,
    local_path: &Path,
    overwrite: bool,
) -> Result<u64, AppError> {
    let size = fs::metadata(local_path)?.len();
    client.upload_from_file(local_path, overwrite)?;
    Ok(size)
}

pub fn delete(client: &impl RemoteObjectClient) -> Result<(), AppError> {
    client.delete_object()
}
