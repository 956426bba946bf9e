/// Errors produced while loading startup configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable {name}")]
    MissingVar { name: &'static str },

    /// An environment variable was set to a value that cannot be parsed.
    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}
