use thiserror::Error;

/// Errors raised while reading configuration from the process environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    /// A variable is set to a value that cannot be used
    #[error("Invalid value for {name}: {value}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}
