use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while opening a TLS session and reading the peer certificate.
#[derive(Error, Debug)]
pub enum Error {
    /// DNS resolution, TCP connect, handshake failure or timeout.
    #[error("failed to establish TLS connection to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: io::Error,
    },

    /// The handshake completed but the peer presented no certificates.
    #[error("no certificates presented by {0}")]
    NoCredential(String),

    /// The leaf certificate could not be decoded.
    #[error("failed to parse peer certificate: {0}")]
    InvalidCredential(String),

    #[error("failed to load trust anchors from {}: {reason}", .path.display())]
    TrustAnchors { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn connection(target: impl Into<String>, source: io::Error) -> Self {
        Self::Connection {
            target: target.into(),
            source,
        }
    }

    /// Returns the I/O error kind for connection failures
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Connection { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
