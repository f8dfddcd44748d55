use serde::Serialize;
use std::fmt;

/// At or below this many days the certificate is critical
pub const CRITICAL_DAYS: f64 = 7.0;

/// At or below this many days (and above [`CRITICAL_DAYS`]) it is a warning
pub const WARNING_DAYS: f64 = 30.0;

/// How soon a certificate needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Expires within 7 days, or already expired
    Critical,
    /// Expires within 30 days
    Warning,
    Ok,
}

impl Urgency {
    /// Classify an unrounded number of remaining days
    #[must_use]
    pub fn from_days(days_remaining: f64) -> Self {
        if days_remaining <= CRITICAL_DAYS {
            Self::Critical
        } else if days_remaining <= WARNING_DAYS {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    /// Process exit status for this tier
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Critical => 1,
            Self::Warning | Self::Ok => 0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Ok => "ok",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
