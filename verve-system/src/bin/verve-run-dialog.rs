//! Opens the session's run dialog on the current display, starting in `$HOME`.

use std::process::ExitCode;

use anyhow::Context;
use tracing::Level;
use verve_core::config::LauncherEnvironment;
use verve_core::logging::init_minimal_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_minimal_logging(Level::WARN);

    let env = LauncherEnvironment::from_process();
    match verve_system::open_run_dialog(&env).await.context("Could not open the run dialog") {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Run dialog request failed");
            eprintln!("verve-run-dialog: {err:?}");
            ExitCode::FAILURE
        }
    }
}
