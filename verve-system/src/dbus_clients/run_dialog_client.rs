//! # Run Dialog D-Bus Client
//!
//! Client for the `org.xfce.RunDialog` service, which any run-dialog provider on
//! the session bus may own (the Verve panel plugin among them). The only call is
//! `OpenDialog(dir: s, display: s)`, asking the provider to show its dialog with
//! `dir` as working directory on the given display.
//!
//! The reply body is not inspected: providers differ in what they return, and
//! delivery of a non-error reply is all the launcher cares about.

use async_trait::async_trait;
use zbus::Proxy;

use crate::dbus_integration::{SessionBus, RUN_DIALOG};
use crate::error::LauncherError;

/// Remote method name on `org.xfce.RunDialog`.
pub const OPEN_DIALOG: &str = "OpenDialog";

// ANCHOR: RunDialogClientTrait
#[async_trait]
pub trait RunDialogClient: Send + Sync {
    /// Asks the provider to open its run dialog.
    async fn open_dialog(&self, home_dir: &str, display_name: &str) -> Result<(), LauncherError>;
}

// ANCHOR: ZbusRunDialogClient
/// [`RunDialogClient`] speaking to the real bus.
#[derive(Clone)]
pub struct ZbusRunDialogClient {
    proxy: Proxy<'static>,
}

impl ZbusRunDialogClient {
    /// Resolves the `org.xfce.RunDialog` proxy on `bus`.
    pub async fn connect(bus: &SessionBus) -> Result<Self, LauncherError> {
        Ok(Self {
            proxy: bus.proxy(&RUN_DIALOG).await?,
        })
    }
}

#[async_trait]
impl RunDialogClient for ZbusRunDialogClient {
    async fn open_dialog(&self, home_dir: &str, display_name: &str) -> Result<(), LauncherError> {
        tracing::debug!(
            service = RUN_DIALOG.service,
            path = RUN_DIALOG.path,
            interface = RUN_DIALOG.interface,
            method = OPEN_DIALOG,
            home_dir,
            display_name,
            "Calling run dialog provider"
        );

        self.proxy
            .call_method(OPEN_DIALOG, &(home_dir, display_name))
            .await
            .map_err(|e| LauncherError::from_call(&RUN_DIALOG, OPEN_DIALOG, e))?;

        Ok(())
    }
}
