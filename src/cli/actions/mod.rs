mod run;

use crate::{
    expiry::Urgency,
    output::Format,
    tls::{SessionConfig, Target},
};

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Check {
        target: Target,
        session: SessionConfig,
        format: Format,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate cannot be retrieved
    pub async fn execute(self) -> anyhow::Result<Urgency> {
        run::execute(self).await
    }
}
