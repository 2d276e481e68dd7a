use thiserror::Error;

/// Library-level errors using thiserror for structured error handling.
///
/// Audio is a non-critical gameplay subsystem: none of these errors are fatal
/// at the dispatch surface. The director logs them and degrades to a no-op;
/// they surface as `Result`s only from constructors and explicit load/save
/// paths where the caller can still decide what to do.

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio clip: {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to decode audio format")]
    DecodeFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Audio playback failed")]
    PlaybackFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("No sound registered under name: {0}")]
    MissingResource(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
