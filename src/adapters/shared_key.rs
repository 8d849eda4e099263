//! Shared Key request signing for the blob REST dialect.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use reqwest::Method;
use reqwest::header::{
    CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_TYPE, DATE, HeaderMap, HeaderName, IF_MATCH,
    IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE, RANGE,
};
use sha2::Sha256;
use url::Url;

use crate::domain::AppError;

const CONTENT_MD5: &str = "content-md5";

/// Signs requests with an account name and decoded account key.
#[derive(Clone)]
pub struct SharedKeySigner {
    account: String,
    key: Vec<u8>,
}

impl std::fmt::Debug for SharedKeySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedKeySigner")
            .field("account", &self.account)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl SharedKeySigner {
    pub fn new(account: impl Into<String>, key: Vec<u8>) -> Self {
        Self { account: account.into(), key }
    }

    /// Value for the `Authorization` header of a request with these parts.
    ///
    /// `headers` must already hold every `x-ms-*` header the request will send.
    pub fn authorization(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        content_length: usize,
    ) -> Result<String, AppError> {
        let payload = self.string_to_sign(method, url, headers, content_length);
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.key)
            .map_err(|e| AppError::transport(format!("Unusable account key: {}", e)))?;
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());
        Ok(format!("SharedKey {}:{}", self.account, signature))
    }

    pub(crate) fn string_to_sign(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        content_length: usize,
    ) -> String {
        let length = if content_length == 0 { String::new() } else { content_length.to_string() };
        let standard = [
            header_value(headers, &CONTENT_ENCODING),
            header_value(headers, &CONTENT_LANGUAGE),
            length.as_str(),
            header_value(headers, &HeaderName::from_static(CONTENT_MD5)),
            header_value(headers, &CONTENT_TYPE),
            header_value(headers, &DATE),
            header_value(headers, &IF_MODIFIED_SINCE),
            header_value(headers, &IF_MATCH),
            header_value(headers, &IF_NONE_MATCH),
            header_value(headers, &IF_UNMODIFIED_SINCE),
            header_value(headers, &RANGE),
        ];

        let mut payload = format!("{}\n", method.as_str());
        for value in standard {
            payload.push_str(value);
            payload.push('\n');
        }
        payload.push_str(&canonical_headers(headers));
        payload.push_str(&self.canonical_resource(url));
        payload
    }

    fn canonical_resource(&self, url: &Url) -> String {
        let mut resource = format!("/{}{}", self.account, url.path());

        let mut params: Vec<(String, Vec<String>)> = Vec::new();
        for (name, value) in url.query_pairs() {
            let name = name.to_lowercase();
            match params.iter_mut().find(|(n, _)| *n == name) {
                Some((_, values)) => values.push(value.into_owned()),
                None => params.push((name, vec![value.into_owned()])),
            }
        }
        params.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, mut values) in params {
            values.sort();
            resource.push_str(&format!("\n{}:{}", name, values.join(",")));
        }
        resource
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> &'a str {
    headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

fn canonical_headers(headers: &HeaderMap) -> String {
    // HeaderName is already lowercase.
    let mut entries: Vec<(&str, &str)> = headers
        .iter()
        .filter(|(name, _)| name.as_str().starts_with("x-ms-"))
        .map(|(name, value)| (name.as_str(), value.to_str().unwrap_or_default().trim()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.iter().map(|(name, value)| format!("{}:{}\n", name, value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn signed_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-ms-version", HeaderValue::from_static("2021-08-06"));
        headers.insert("x-ms-date", HeaderValue::from_static("Sun, 18 Oct 2026 10:00:00 GMT"));
        headers
    }

    #[test]
    fn string_to_sign_for_plain_get() {
        let signer = SharedKeySigner::new("devstoreaccount1", b"key".to_vec());
        let url = Url::parse("http://127.0.0.1:10000/devstoreaccount1/configs/t.yaml").unwrap();

        let payload = signer.string_to_sign(&Method::GET, &url, &signed_headers(), 0);

        assert_eq!(
            payload,
            "GET\n\n\n\n\n\n\n\n\n\n\n\n\
             x-ms-date:Sun, 18 Oct 2026 10:00:00 GMT\n\
             x-ms-version:2021-08-06\n\
             /devstoreaccount1/devstoreaccount1/configs/t.yaml"
        );
    }

    #[test]
    fn string_to_sign_includes_length_precondition_and_sorted_query() {
        let signer = SharedKeySigner::new("acme", b"key".to_vec());
        let url = Url::parse("https://acme.blob.core.windows.net/c/t.csv?timeout=30&comp=x").unwrap();
        let mut headers = signed_headers();
        headers.insert(IF_NONE_MATCH, HeaderValue::from_static("*"));
        headers.insert("x-ms-blob-type", HeaderValue::from_static("BlockBlob"));

        let payload = signer.string_to_sign(&Method::PUT, &url, &headers, 12);

        let lines: Vec<&str> = payload.split('\n').collect();
        assert_eq!(lines[0], "PUT");
        assert_eq!(lines[3], "12");
        assert_eq!(lines[9], "*");
        assert_eq!(lines[12], "x-ms-blob-type:BlockBlob");
        assert!(payload.ends_with("/acme/c/t.csv\ncomp:x\ntimeout:30"));
    }

    #[test]
    fn authorization_is_verifiable_hmac() {
        let signer = SharedKeySigner::new("acme", b"secret-key".to_vec());
        let url = Url::parse("https://acme.blob.core.windows.net/c/t.yaml").unwrap();
        let headers = signed_headers();

        let value = signer.authorization(&Method::DELETE, &url, &headers, 0).unwrap();
        let signature = value.strip_prefix("SharedKey acme:").unwrap();

        let mut mac = Hmac::<Sha256>::new_from_slice(b"secret-key").unwrap();
        mac.update(signer.string_to_sign(&Method::DELETE, &url, &headers, 0).as_bytes());
        mac.verify_slice(&STANDARD.decode(signature).unwrap()).unwrap();
    }

    #[test]
    fn debug_redacts_key() {
        let signer = SharedKeySigner::new("acme", b"secret-key".to_vec());
        assert!(!format!("{:?}", signer).contains("secret"));
    }
}
