mod config;
mod environment;
mod error;

pub use config::MonoConfig;
pub use environment::Environment;
pub use error::ConfigError;
