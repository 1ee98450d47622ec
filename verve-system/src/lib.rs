//! # Verve System (`verve-system`)
//!
//! Session-bus and display-server integration for the Verve launchers:
//!
//! - [`dbus_integration`]: session bus connection and the well-known targets.
//! - [`dbus_clients`]: typed clients for `org.xfce.RunDialog` and `org.xfce.Verve`.
//! - [`display_management`]: naming the display the launcher runs on.
//! - [`launcher`]: the invoker tying the above together.

pub mod dbus_clients;
pub mod dbus_integration;
pub mod display_management;
pub mod error;
pub mod launcher;

pub use dbus_clients::{RunDialogClient, VerveFocusClient, ZbusRunDialogClient, ZbusVerveFocusClient};
pub use dbus_integration::{BusTarget, SessionBus, RUN_DIALOG, VERVE};
pub use display_management::{DisplayError, DisplayQuery, SystemDisplayQuery};
pub use error::LauncherError;
pub use launcher::{grab_focus, open_run_dialog, LaunchRequest, LauncherInvoker};
