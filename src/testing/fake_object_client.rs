use std::cell::RefCell;
use std::fs;
use std::path::Path;

use crate::domain::{AppError, ObjectLocation};
use crate::ports::RemoteObjectClient;

/// In-memory stand-in for a single remote object.
#[allow(dead_code)]
pub struct FakeObjectClient {
    pub location: ObjectLocation,
    pub content: RefCell<Option<Vec<u8>>>,
    pub calls: RefCell<Vec<&'static str>>,
}

#[allow(dead_code)]
impl FakeObjectClient {
    pub fn new(container: &str, path: &str) -> Self {
        Self {
            location: ObjectLocation::new(container, path),
            content: RefCell::new(None),
            calls: RefCell::new(vec![]),
        }
    }

    pub fn with_content(self, content: impl AsRef<[u8]>) -> Self {
        self.put(content);
        self
    }

    pub fn put(&self, content: impl AsRef<[u8]>) {
        *self.content.borrow_mut() = Some(content.as_ref().to_vec());
    }

    pub fn stored(&self) -> Option<Vec<u8>> {
        self.content.borrow().clone()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

impl RemoteObjectClient for FakeObjectClient {
    fn location(&self) -> &ObjectLocation {
        &self.location
    }

    fn download_bytes(&self) -> Result<Vec<u8>, AppError> {
        self.record("download_bytes");
        self.stored().ok_or_else(|| self.location.not_found())
    }

    fn download_to_file(&self, local_path: &Path) -> Result<(), AppError> {
        self.record("download_to_file");
        let content = self.stored().ok_or_else(|| self.location.not_found())?;
        fs::write(local_path, content)?;
        Ok(())
    }

    fn upload_from_file(&self, local_path: &Path, overwrite: bool) -> Result<(), AppError> {
        self.record("upload_from_file");
        let content = fs::read(local_path)?;
        if !overwrite && self.content.borrow().is_some() {
            return Err(self.location.conflict());
        }
        self.put(content);
        Ok(())
    }

    fn delete_object(&self) -> Result<(), AppError> {
        self.record("delete_object");
        match self.content.borrow_mut().take() {
            Some(_) => Ok(()),
            None => Err(self.location.not_found()),
        }
    }
}
