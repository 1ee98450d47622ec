// verve-system/src/dbus_integration/manager.rs

use zbus::{CacheProperties, Connection, Proxy, ProxyBuilder};

use super::BusTarget;
use crate::error::LauncherError;

/// Owns the D-Bus connection the launcher clients talk through.
#[derive(Clone)]
pub struct SessionBus {
    connection: Connection,
}

impl SessionBus {
    /// Connects to the user's session bus.
    ///
    /// The bus address comes from the environment `zbus` consults
    /// (`DBUS_SESSION_BUS_ADDRESS`, then `XDG_RUNTIME_DIR/bus`).
    pub async fn connect() -> Result<Self, LauncherError> {
        tracing::debug!("Connecting to D-Bus session bus...");
        let connection = Connection::session().await.map_err(LauncherError::BusUnavailable)?;
        tracing::debug!(
            unique_name = %connection.unique_name().map_or_else(|| "<unknown>".to_string(), |n| n.to_string()),
            "Connected to D-Bus session bus"
        );
        Ok(Self::from_connection(connection))
    }

    /// Wraps an already established connection (e.g. a peer-to-peer one).
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Resolves a proxy for `target`.
    ///
    /// This only builds the local handle; it does not check that a provider owns
    /// the service name. That surfaces on the first call.
    pub async fn proxy(&self, target: &BusTarget) -> Result<Proxy<'static>, LauncherError> {
        let resolution_error = |source: zbus::Error| LauncherError::ProxyResolution {
            service: target.service,
            path: target.path,
            source,
        };

        let proxy = ProxyBuilder::<Proxy<'static>>::new_bare(&self.connection)
            .destination(target.service)
            .map_err(resolution_error)?
            .path(target.path)
            .map_err(resolution_error)?
            .interface(target.interface)
            .map_err(resolution_error)?
            .cache_properties(CacheProperties::No)
            .build()
            .await
            .map_err(resolution_error)?;

        tracing::debug!(
            service = target.service,
            path = target.path,
            interface = target.interface,
            "Resolved D-Bus proxy"
        );
        Ok(proxy)
    }
}
