//! Crate-level error type.

use crate::timestamp::ParseTimestampError;

use std::net::SocketAddr;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("request to time server failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("time server responded with {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("time server returned an invalid timestamp: {0}")]
    InvalidResponse(#[from] ParseTimestampError),
}
