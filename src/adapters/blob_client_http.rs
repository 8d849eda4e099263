//! Blob storage client implementation using reqwest.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use chrono::Utc;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, IF_NONE_MATCH};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use url::Url;

use super::shared_key::SharedKeySigner;
use crate::domain::{AppError, ConnectionString, Credential, LogLevel, Logger, ObjectLocation};
use crate::ports::RemoteObjectClient;

const X_MS_VERSION: &str = "x-ms-version";
const X_MS_DATE: &str = "x-ms-date";
const X_MS_BLOB_TYPE: &str = "x-ms-blob-type";
const X_MS_ERROR_CODE: &str = "x-ms-error-code";
const X_MS_META_SHA256: &str = "x-ms-meta-sha256";
const STORAGE_API_VERSION: &str = "2021-08-06";
const READ_CHUNK: usize = 64 * 1024;

/// HTTP transport for one blob.
///
/// Requests carry a shared access signature in the URL or a Shared Key `Authorization`
/// header. This client performs a single request per call and never retries.
#[derive(Clone)]
pub struct HttpBlobClient {
    location: ObjectLocation,
    url: Url,
    signer: Option<SharedKeySigner>,
    client: Client,
    logger: Logger,
}

impl std::fmt::Debug for HttpBlobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut url = self.url.clone();
        url.set_query(None);
        f.debug_struct("HttpBlobClient")
            .field("location", &self.location)
            .field("url", &url.as_str())
            .field("signer", &self.signer)
            .field("signature", &"[REDACTED]")
            .finish()
    }
}

impl HttpBlobClient {
    /// Bind a client to `container`/`path` using the given connection string.
    pub fn new(
        connection_string: &str,
        container: impl Into<String>,
        path: impl Into<String>,
        log_level: LogLevel,
    ) -> Result<Self, AppError> {
        let logger = Logger::new("client", log_level);
        let connection: ConnectionString = connection_string.parse()?;
        let location = ObjectLocation::new(container, path);
        let url = connection.object_url(&location)?;
        let signer = match connection.credential() {
            Credential::Signature(_) => None,
            Credential::SharedKey { account, key } => {
                Some(SharedKeySigner::new(account.clone(), key.clone()))
            }
        };

        let client = Client::builder()
            .build()
            .map_err(|e| AppError::transport(format!("Failed to create HTTP client: {}", e)))?;

        logger.debug(format_args!("Bound to {} at {}", location, connection.endpoint()));
        Ok(Self { location, url, signer, client, logger })
    }

    fn request(
        &self,
        method: Method,
        mut headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<RequestBuilder, AppError> {
        headers.insert(X_MS_VERSION, HeaderValue::from_static(STORAGE_API_VERSION));
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        headers.insert(X_MS_DATE, header(&date)?);

        if let Some(signer) = &self.signer {
            let length = body.as_ref().map_or(0, Vec::len);
            let authorization = signer.authorization(&method, &self.url, &headers, length)?;
            headers.insert(AUTHORIZATION, header(&authorization)?);
        }

        let request = self.client.request(method, self.url.clone()).headers(headers);
        Ok(match body {
            Some(body) => request.body(body),
            None => request,
        })
    }

    fn execute(&self, request: RequestBuilder) -> Result<Response, AppError> {
        // The URL carries the signature, so it never goes into messages.
        request
            .send()
            .map_err(|e| AppError::transport(format!("HTTP request failed: {}", e.without_url())))
    }

    fn check(&self, response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let code = response
            .headers()
            .get(X_MS_ERROR_CODE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        self.logger.warning(format_args!("{} returned {} ({})", self.location, status, code));

        if status == StatusCode::NOT_FOUND {
            return Err(self.location.not_found());
        }
        Err(AppError::transport(format!(
            "Storage service returned {} ({}) for {}",
            status.as_u16(),
            code,
            self.location
        )))
    }

    fn read_body(response: Response) -> Result<Vec<u8>, AppError> {
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| AppError::transport(format!("Failed to read response: {}", e.without_url())))
    }

    /// Copy the body into `staged`. Body failures are transport errors, disk failures are I/O.
    fn stream_body(
        &self,
        response: &mut Response,
        staged: &mut impl Write,
    ) -> Result<u64, AppError> {
        let mut buffer = vec![0u8; READ_CHUNK];
        let mut written = 0u64;
        loop {
            let read = match response.read(&mut buffer) {
                Ok(0) => return Ok(written),
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                // Only the kind: the wrapped reqwest error may name the signed URL.
                Err(e) => {
                    return Err(AppError::transport(format!(
                        "Failed to read response for {}: {}",
                        self.location,
                        e.kind()
                    )));
                }
            };
            staged.write_all(&buffer[..read])?;
            written += read as u64;
        }
    }
}

fn header(value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::transport(format!("Invalid header value: {}", e)))
}

impl RemoteObjectClient for HttpBlobClient {
    fn location(&self) -> &ObjectLocation {
        &self.location
    }

    fn download_bytes(&self) -> Result<Vec<u8>, AppError> {
        let response =
            self.check(self.execute(self.request(Method::GET, HeaderMap::new(), None)?)?)?;
        let content = Self::read_body(response)?;
        self.logger.debug(format_args!("Downloaded {} bytes from {}", content.len(), self.location));
        Ok(content)
    }

    fn download_to_file(&self, local_path: &Path) -> Result<(), AppError> {
        let mut response =
            self.check(self.execute(self.request(Method::GET, HeaderMap::new(), None)?)?)?;

        // Stage next to the target so the final rename stays on one filesystem.
        let parent = match local_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(parent)?;
        let written = self.stream_body(&mut response, &mut staged)?;
        staged.persist(local_path).map_err(|e| AppError::Io(e.error))?;

        self.logger.debug(format_args!(
            "Wrote {} bytes from {} to {}",
            written,
            self.location,
            local_path.display()
        ));
        Ok(())
    }

    fn upload_from_file(&self, local_path: &Path, overwrite: bool) -> Result<(), AppError> {
        let content = fs::read(local_path)?;
        let digest = format!("{:x}", Sha256::digest(&content));
        let size = content.len();

        let mut headers = HeaderMap::new();
        headers.insert(X_MS_BLOB_TYPE, HeaderValue::from_static("BlockBlob"));
        headers.insert(X_MS_META_SHA256, header(&digest)?);
        if !overwrite {
            headers.insert(IF_NONE_MATCH, HeaderValue::from_static("*"));
        }

        let response = self.execute(self.request(Method::PUT, headers, Some(content))?)?;
        if !overwrite
            && matches!(response.status(), StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED)
        {
            self.logger.warning(format_args!("{} already exists", self.location));
            return Err(self.location.conflict());
        }
        self.check(response)?;

        self.logger.info(format_args!(
            "Uploaded {} ({} bytes, sha256 {}) to {}",
            local_path.display(),
            size,
            digest,
            self.location
        ));
        Ok(())
    }

    fn delete_object(&self) -> Result<(), AppError> {
        self.check(self.execute(self.request(Method::DELETE, HeaderMap::new(), None)?)?)?;
        self.logger.info(format_args!("Deleted {}", self.location));
        Ok(())
    }
}
