use crate::{
    cli::actions::Action,
    output::Format,
    tls::{DEFAULT_TIMEOUT, SessionConfig, Target},
};
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    time::Duration,
};

/// Pick the output format; colors only when stdout is a terminal
fn extract_format(matches: &ArgMatches, stdout_is_terminal: bool) -> Format {
    if matches.get_flag("json") {
        Format::Json
    } else {
        Format::Text {
            color: stdout_is_terminal && !matches.get_flag("no-color"),
        }
    }
}

fn extract_session_config(matches: &ArgMatches) -> SessionConfig {
    let timeout = matches
        .get_one::<u64>("timeout")
        .copied()
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

    SessionConfig {
        verify_trust: matches.get_flag("verify"),
        ca_file: matches.get_one::<PathBuf>("ca-file").cloned(),
        timeout,
    }
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the domain is missing
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    let domain = matches
        .get_one::<String>("domain")
        .context("domain is required")?;
    let port = matches.get_one::<String>("port").cloned();

    Ok(Action::Check {
        target: Target::new(domain.clone(), port),
        session: extract_session_config(matches),
        format: extract_format(matches, io::stdout().is_terminal()),
    })
}
