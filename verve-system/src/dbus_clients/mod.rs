//! Typed clients for the remote objects the launchers call.

pub mod run_dialog_client;
pub mod verve_focus_client;

pub use run_dialog_client::{RunDialogClient, ZbusRunDialogClient, OPEN_DIALOG};
pub use verve_focus_client::{VerveFocusClient, ZbusVerveFocusClient, GRAB_FOCUS, GRAB_FOCUS_TIMEOUT};
