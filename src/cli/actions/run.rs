use super::Action;
use crate::{expiry, expiry::Urgency, output, tls};
use anyhow::Context;
use chrono::Utc;
use tracing::debug;

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> anyhow::Result<Urgency> {
    match action {
        Action::Check {
            target,
            session,
            format,
        } => {
            let credential = tls::inspect(&target, &session)
                .await
                .context("Error checking certificate")?;

            // single snapshot for both the classification and the printed days
            let now = Utc::now();
            let report = expiry::evaluate(&credential, now);
            debug!(
                days_remaining = report.days_remaining(),
                urgency = %report.urgency(),
                "certificate evaluated"
            );

            println!("{}", output::render(&report, format)?);

            Ok(report.urgency())
        }
    }
}
