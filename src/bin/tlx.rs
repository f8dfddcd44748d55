use std::process::ExitCode;

/// Exit status for failures, distinct from the critical-expiry status 1
const ERROR_EXIT_CODE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match tlx::cli::start().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}
