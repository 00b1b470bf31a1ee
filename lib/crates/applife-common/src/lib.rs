pub mod config;
pub mod types;

pub use config::RegistryConfig;
pub use types::*;
