//! Errors surfaced by the command line front-end.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid configuration and arguments.
    #[error("{0}")]
    Config(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// None of the configured hosts accepted a connection.
    #[error("could not connect to mysql ({hosts}): {source}")]
    Connectivity {
        hosts: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Generate(#[from] modelgen::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
