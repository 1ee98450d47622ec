//! # Launcher Invoker
//!
//! Glue behind the `verve-run-dialog` and `verve-focus` binaries. Each run performs
//! its lookups once, makes a single remote call and returns; every failure is
//! handed back to the caller untouched.

use verve_core::config::LauncherEnvironment;

use crate::dbus_clients::{RunDialogClient, VerveFocusClient, ZbusRunDialogClient, ZbusVerveFocusClient};
use crate::dbus_integration::{SessionBus, RUN_DIALOG};
use crate::display_management::{DisplayQuery, SystemDisplayQuery};
use crate::error::LauncherError;

/// Arguments of one `OpenDialog` call, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub home_dir: String,
    pub display_name: String,
}

// ANCHOR: LauncherInvokerStruct
pub struct LauncherInvoker<C, D> {
    client: C,
    display: D,
}

impl<C: RunDialogClient, D: DisplayQuery> LauncherInvoker<C, D> {
    pub fn new(client: C, display: D) -> Self {
        Self { client, display }
    }

    /// Reads the home directory, then queries the display.
    pub fn prepare(&self, env: &LauncherEnvironment) -> Result<LaunchRequest, LauncherError> {
        let home_dir = env.home_dir()?;
        let display_name = self.display.default_display_name(env)?;
        Ok(LaunchRequest { home_dir, display_name })
    }

    /// Prepares the request and sends it. Returns what was sent.
    pub async fn invoke(&self, env: &LauncherEnvironment) -> Result<LaunchRequest, LauncherError> {
        let request = self.prepare(env)?;
        self.client
            .open_dialog(&request.home_dir, &request.display_name)
            .await?;
        tracing::info!(
            service = RUN_DIALOG.service,
            home_dir = %request.home_dir,
            display_name = %request.display_name,
            "Run dialog requested"
        );
        Ok(request)
    }
}

/// Full production sequence: session bus, proxy, home directory, display, `OpenDialog`.
pub async fn open_run_dialog(env: &LauncherEnvironment) -> Result<LaunchRequest, LauncherError> {
    let bus = SessionBus::connect().await?;
    let client = ZbusRunDialogClient::connect(&bus).await?;
    LauncherInvoker::new(client, SystemDisplayQuery::new()).invoke(env).await
}

/// Asks a running Verve plugin to take keyboard focus.
pub async fn grab_focus() -> Result<(), LauncherError> {
    let bus = SessionBus::connect().await?;
    ZbusVerveFocusClient::connect(&bus).await?.grab_focus().await
}
