//! TLS session opening and peer certificate extraction
//!
//! # Module Organization
//!
//! - `config` - Target and session settings
//! - `credential` - Leaf certificate decoding
//! - `probe` - Connecting, handshaking and the scoped session
//! - `verifier` - Client configuration and certificate verifiers
//!
//! # Example
//!
//! ```rust,ignore
//! use tlx::tls::{SessionConfig, Target, inspect};
//!
//! let target = Target::new("example.com", None);
//! let credential = inspect(&target, &SessionConfig::default()).await?;
//! println!("{} expires {}", credential.subject_name, credential.not_after);
//! ```

pub mod config;
pub mod credential;
pub mod probe;
pub mod verifier;

// Re-export commonly used types
pub use config::{DEFAULT_PORT, DEFAULT_TIMEOUT, SessionConfig, Target};
pub use credential::{PeerCredential, common_name};
pub use probe::{Session, inspect, open};
pub use verifier::{NoVerifier, build_client_config, ensure_crypto_provider};
