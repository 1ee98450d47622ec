//! Client for `org.xfce.Verve.GrabFocus`, which moves keyboard focus into the
//! Verve panel plugin's command entry.

use std::time::Duration;

use async_trait::async_trait;
use zbus::Proxy;

use crate::dbus_integration::{SessionBus, VERVE};
use crate::error::LauncherError;

pub const GRAB_FOCUS: &str = "GrabFocus";

/// How long to wait for the plugin to acknowledge `GrabFocus`.
pub const GRAB_FOCUS_TIMEOUT: Duration = Duration::from_millis(5000);

#[async_trait]
pub trait VerveFocusClient: Send + Sync {
    async fn grab_focus(&self) -> Result<(), LauncherError>;
}

#[derive(Clone)]
pub struct ZbusVerveFocusClient {
    proxy: Proxy<'static>,
    timeout: Duration,
}

impl ZbusVerveFocusClient {
    pub async fn connect(bus: &SessionBus) -> Result<Self, LauncherError> {
        Self::with_timeout(bus, GRAB_FOCUS_TIMEOUT).await
    }

    pub async fn with_timeout(bus: &SessionBus, timeout: Duration) -> Result<Self, LauncherError> {
        Ok(Self {
            proxy: bus.proxy(&VERVE).await?,
            timeout,
        })
    }
}

#[async_trait]
impl VerveFocusClient for ZbusVerveFocusClient {
    async fn grab_focus(&self) -> Result<(), LauncherError> {
        tracing::debug!(service = VERVE.service, method = GRAB_FOCUS, timeout = ?self.timeout, "Requesting focus");

        let call = self.proxy.call_method(GRAB_FOCUS, &());
        match tokio::time::timeout(self.timeout, call).await {
            Ok(reply) => {
                reply.map_err(|e| LauncherError::from_call(&VERVE, GRAB_FOCUS, e))?;
                Ok(())
            }
            Err(_) => Err(LauncherError::Timeout {
                interface: VERVE.interface,
                method: GRAB_FOCUS,
                timeout: self.timeout,
            }),
        }
    }
}
