pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod source;
pub mod store;

pub use config::AppConfig;
pub use error::ReconcileError;
pub use service::ReconcileService;
pub use source::UpstreamClient;
pub use store::MemoryStore;
