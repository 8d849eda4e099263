pub mod blob_client_http;
pub mod shared_key;

pub use blob_client_http::HttpBlobClient;
pub use shared_key::SharedKeySigner;
