use std::{fmt, path::PathBuf, time::Duration};

/// Port used when the caller does not supply one
pub const DEFAULT_PORT: &str = "443";

/// Connect + handshake budget when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Host and port of the server to inspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    host: String,
    port: String,
}

impl Target {
    #[must_use]
    pub fn new(host: impl Into<String>, port: Option<String>) -> Self {
        Self {
            host: host.into(),
            port: port.unwrap_or_else(|| DEFAULT_PORT.to_string()),
        }
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> &str {
        &self.port
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // IPv6 literals need brackets to keep the port unambiguous
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// TLS session settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Validate the presented chain against trusted roots.
    ///
    /// Disabled by default: the point is to read whatever certificate the
    /// server presents, including expired or self-signed ones.
    pub verify_trust: bool,
    /// PEM bundle used as trust anchors instead of the bundled Mozilla roots
    pub ca_file: Option<PathBuf>,
    /// Upper bound for TCP connect plus TLS handshake
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            verify_trust: false,
            ca_file: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
