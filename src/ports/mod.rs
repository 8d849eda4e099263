mod remote_object_client;

pub use remote_object_client::RemoteObjectClient;
