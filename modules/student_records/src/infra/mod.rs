pub mod http_store;
pub mod traced_client;

pub use http_store::HttpStudentStore;
pub use traced_client::TracedClient;
