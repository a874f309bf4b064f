pub mod engine;
pub mod protocol;
pub mod loader;
pub mod api_client;
pub mod error;
