pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{build_router, AppState};
pub use config::ServerConfig;
pub use utils::error::{Result, ServiceError};
