//! Certificate expiry evaluation
//!
//! Turns a [`PeerCredential`](crate::tls::PeerCredential) and a caller-supplied
//! "now" into an [`ExpiryReport`]. Nothing in here reads the wall clock.

pub mod report;
pub mod urgency;

pub use report::{ExpiryReport, days_remaining, evaluate};
pub use urgency::{CRITICAL_DAYS, Urgency, WARNING_DAYS};
