//! Moves keyboard focus into a running Verve panel plugin.

use std::process::ExitCode;

use anyhow::Context;
use tracing::Level;
use verve_core::logging::init_minimal_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_minimal_logging(Level::WARN);

    match verve_system::grab_focus().await.context("Could not focus the Verve command entry") {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Focus request failed");
            eprintln!("verve-focus: {err:?}");
            ExitCode::FAILURE
        }
    }
}
