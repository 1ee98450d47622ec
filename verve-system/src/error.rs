//! Error taxonomy for the launcher binaries.
//!
//! Every failure is fatal. The variants exist so the top-level entry point can
//! report *which* step failed before exiting non-zero.

use std::time::Duration;

use thiserror::Error;
use verve_core::error::ConfigError;
use zbus::fdo;

use crate::dbus_integration::BusTarget;
use crate::display_management::DisplayError;

/// Remote error names meaning "nobody is serving this target right now".
const SERVICE_UNAVAILABLE_ERRORS: &[&str] = &[
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.NameHasNoOwner",
    "org.freedesktop.DBus.Error.UnknownObject",
];

#[derive(Debug, Error)]
pub enum LauncherError {
    /// No session bus is reachable.
    #[error("Failed to connect to the D-Bus session bus")]
    BusUnavailable(#[source] zbus::Error),

    /// The proxy for a remote object could not be built.
    #[error("Failed to resolve D-Bus object {path} on {service}")]
    ProxyResolution {
        service: &'static str,
        path: &'static str,
        #[source]
        source: zbus::Error,
    },

    /// No default display/screen could be resolved.
    #[error("Failed to determine the current display")]
    DisplayQuery(#[from] DisplayError),

    /// The remote service is not registered on the bus.
    #[error("There seems to be no {service} D-Bus provider running")]
    ServiceUnavailable {
        service: &'static str,
        #[source]
        source: zbus::Error,
    },

    /// The remote call was delivered but failed.
    #[error("D-Bus call {interface}.{method} failed")]
    RemoteCall {
        interface: &'static str,
        method: &'static str,
        #[source]
        source: zbus::Error,
    },

    /// No reply arrived in time.
    #[error("D-Bus call {interface}.{method} got no reply within {timeout:?}")]
    Timeout {
        interface: &'static str,
        method: &'static str,
        timeout: Duration,
    },

    #[error("Invalid launcher environment")]
    Config(#[from] ConfigError),
}

impl LauncherError {
    /// Classifies a failed method call on `target`.
    pub fn from_call(target: &BusTarget, method: &'static str, source: zbus::Error) -> Self {
        if is_service_unavailable(&source) {
            Self::ServiceUnavailable {
                service: target.service,
                source,
            }
        } else {
            Self::RemoteCall {
                interface: target.interface,
                method,
                source,
            }
        }
    }
}

fn is_service_unavailable(err: &zbus::Error) -> bool {
    match err {
        zbus::Error::MethodError(name, _, _) => SERVICE_UNAVAILABLE_ERRORS.contains(&name.as_str()),
        zbus::Error::FDO(fdo_err) => matches!(
            **fdo_err,
            fdo::Error::ServiceUnknown(_) | fdo::Error::NameHasNoOwner(_) | fdo::Error::UnknownObject(_)
        ),
        _ => false,
    }
}
