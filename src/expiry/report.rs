use super::Urgency;
use crate::tls::PeerCredential;
use chrono::{DateTime, Utc};
use serde::Serialize;

const SECONDS_PER_HOUR: f64 = 3600.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Remaining validity in days, fractional and unrounded.
///
/// Negative once `not_after` has passed.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn days_remaining(not_after: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let delta = not_after.signed_duration_since(now);
    let seconds = delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9;
    seconds / SECONDS_PER_HOUR / HOURS_PER_DAY
}

/// Expiry evaluation for one certificate at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiryReport {
    #[serde(rename = "subject")]
    subject_name: String,
    issuer: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    days_remaining: f64,
    urgency: Urgency,
}

impl ExpiryReport {
    #[must_use]
    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    #[must_use]
    pub const fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    #[must_use]
    pub const fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    /// Unrounded value used for the urgency decision
    #[must_use]
    pub const fn days_remaining(&self) -> f64 {
        self.days_remaining
    }

    #[must_use]
    pub const fn urgency(&self) -> Urgency {
        self.urgency
    }

    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.urgency.exit_code()
    }
}

/// Evaluate `credential` against `now`.
///
/// Pure: the caller captures `now` once and the same value drives both the
/// classification and anything rendered from the report.
#[must_use]
pub fn evaluate(credential: &PeerCredential, now: DateTime<Utc>) -> ExpiryReport {
    let days_remaining = days_remaining(credential.not_after, now);

    ExpiryReport {
        subject_name: credential.subject_name.clone(),
        issuer: credential.issuer.clone(),
        not_before: credential.not_before,
        not_after: credential.not_after,
        days_remaining,
        urgency: Urgency::from_days(days_remaining),
    }
}
