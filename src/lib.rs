//! Check how many days remain before a server's TLS certificate expires.
//!
//! The crate opens a TLS session (without trust validation unless asked),
//! reads the leaf certificate and classifies its remaining validity as
//! critical, warning or ok.

pub mod cli;
pub mod error;
pub mod expiry;
pub mod output;
pub mod tls;

pub use error::{Error, Result};

/// Version reported by `--version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
