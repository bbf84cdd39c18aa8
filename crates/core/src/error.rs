use thiserror::Error;

/// Errors raised while loading [`Settings`](crate::Settings).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid TOML or has the wrong shape.
    #[error("invalid configuration: {0}")]
    Parse(String),
}
