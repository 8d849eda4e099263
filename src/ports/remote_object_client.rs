//! Remote object client port definition.

use std::path::Path;

use crate::domain::{AppError, ObjectLocation};

/// Port for fetch/store/delete of one named remote object.
///
/// Every call is a single blocking round trip; implementations do not retry.
pub trait RemoteObjectClient {
    /// The container and path this client is bound to.
    fn location(&self) -> &ObjectLocation;

    /// Read the full object content.
    fn download_bytes(&self) -> Result<Vec<u8>, AppError>;

    /// Write the full object content to `local_path`, creating or truncating it.
    fn download_to_file(&self, local_path: &Path) -> Result<(), AppError>;

    /// Replace the object content with the bytes of `local_path`.
    ///
    /// Fails with `AppError::Conflict` when the object exists and `overwrite` is false.
    fn upload_from_file(&self, local_path: &Path, overwrite: bool) -> Result<(), AppError>;

    /// Remove the object. Deleting an absent object is `AppError::NotFound`.
    fn delete_object(&self) -> Result<(), AppError>;
}
