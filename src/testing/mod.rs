mod fake_object_client;

pub use fake_object_client::FakeObjectClient;
