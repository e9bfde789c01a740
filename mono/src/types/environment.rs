//! Deployment stage of the calling application

use std::env;

use tracing::Level;

use super::ConfigError;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production: structured (JSON) logs
    Production,
    /// Development: human readable logs, verbose by default
    Development,
}

impl Environment {
    /// Reads the `APP_ENV` environment variable, defaulting to development
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `APP_ENV` is set to an unknown stage
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            _ => Err(ConfigError::Invalid {
                name: "APP_ENV",
                value: env,
            }),
        }
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Default log level, overridable with `TRACING_LEVEL`
    #[must_use]
    pub fn tracing_level(self) -> Level {
        env::var("TRACING_LEVEL")
            .ok()
            .and_then(|val| val.parse::<Level>().ok())
            .unwrap_or(match self {
                Self::Production => Level::INFO,
                Self::Development => Level::DEBUG,
            })
    }
}
