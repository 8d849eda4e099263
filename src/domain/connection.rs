//! Connection strings and object locations for blob containers.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use url::Url;

use crate::domain::AppError;

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// How requests to the storage service are authorized.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Shared access signature appended to every object URL as its query string.
    Signature(String),
    /// Account name and decoded account key used to sign each request.
    SharedKey { account: String, key: Vec<u8> },
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Signature(_) => f.write_str("Signature([REDACTED])"),
            Credential::SharedKey { account, .. } => f
                .debug_struct("SharedKey")
                .field("account", account)
                .field("key", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Parsed storage connection string.
///
/// A `SharedAccessSignature` wins over an `AccountKey` when both are present.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    endpoint: Url,
    credential: Credential,
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionString")
            .field("endpoint", &self.endpoint.as_str())
            .field("credential", &self.credential)
            .finish()
    }
}

impl ConnectionString {
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Build the URL of one object, signature included when the credential is one.
    pub fn object_url(&self, location: &ObjectLocation) -> Result<Url, AppError> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                AppError::transport(format!("Endpoint '{}' cannot carry a path", self.endpoint))
            })?;
            segments.pop_if_empty();
            segments.push(&location.container);
            for part in location.path.split('/').filter(|p| !p.is_empty()) {
                segments.push(part);
            }
        }
        if let Credential::Signature(signature) = &self.credential {
            url.set_query(Some(signature));
        }
        Ok(url)
    }
}

impl FromStr for ConnectionString {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut blob_endpoint = None;
        let mut signature = None;
        let mut account_name = None;
        let mut account_key = None;
        let mut protocol = None;
        let mut suffix = None;

        for pair in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                AppError::transport(format!("Malformed connection string segment '{}'", key_of(pair)))
            })?;
            match key {
                "BlobEndpoint" => blob_endpoint = Some(value),
                "SharedAccessSignature" => signature = Some(value.trim_start_matches('?')),
                "AccountName" => account_name = Some(value),
                "AccountKey" => account_key = Some(value),
                "DefaultEndpointsProtocol" => protocol = Some(value),
                "EndpointSuffix" => suffix = Some(value),
                _ => {}
            }
        }

        let credential = match (signature, account_key) {
            (Some(sig), _) if !sig.is_empty() => Credential::Signature(sig.to_string()),
            (_, Some(key)) => {
                let account = account_name.ok_or_else(|| {
                    AppError::transport("AccountKey credentials need an AccountName")
                })?;
                // Base64 values end in '=', which split_once leaves in place.
                let key = STANDARD
                    .decode(key)
                    .map_err(|_| AppError::transport("AccountKey is not valid base64"))?;
                Credential::SharedKey { account: account.to_string(), key }
            }
            _ => {
                return Err(AppError::transport(
                    "Connection string needs a SharedAccessSignature or an AccountKey",
                ));
            }
        };

        let endpoint = match (blob_endpoint, account_name) {
            (Some(endpoint), _) => endpoint.to_string(),
            (None, Some(account)) => format!(
                "{}://{}.blob.{}",
                protocol.unwrap_or(DEFAULT_PROTOCOL),
                account,
                suffix.unwrap_or(DEFAULT_ENDPOINT_SUFFIX)
            ),
            (None, None) => {
                return Err(AppError::transport(
                    "Connection string needs either BlobEndpoint or AccountName",
                ));
            }
        };

        let endpoint = Url::parse(&endpoint)
            .map_err(|e| AppError::transport(format!("Invalid blob endpoint '{}': {}", endpoint, e)))?;

        Ok(Self { endpoint, credential })
    }
}

// Never echo a value back: it may hold the signature.
fn key_of(pair: &str) -> &str {
    pair.split('=').next().unwrap_or_default()
}

/// One object inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    pub container: String,
    pub path: String,
}

impl ObjectLocation {
    pub fn new(container: impl Into<String>, path: impl Into<String>) -> Self {
        Self { container: container.into(), path: path.into() }
    }

    pub fn not_found(&self) -> AppError {
        AppError::NotFound { container: self.container.clone(), path: self.path.clone() }
    }

    pub fn conflict(&self) -> AppError {
        AppError::Conflict { container: self.container.clone(), path: self.path.clone() }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.path)
    }
}
