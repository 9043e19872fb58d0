pub mod config;
pub mod email_client;
pub mod library_client;
pub mod refine_client;

pub use config::BackendConfig;
pub use email_client::EmailJsClient;
pub use library_client::LibraryApiClient;
pub use refine_client::RefineApiClient;
