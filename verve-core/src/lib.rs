//! # Verve Core Library (`verve-core`)
//!
//! `verve-core` is the foundational layer shared by the Verve launcher binaries.
//! It owns the pieces every launcher needs before it talks to the session bus:
//!
//! - **Error Handling**: [`CoreError`] and its specific variants [`ConfigError`]
//!   and [`LoggingError`].
//! - **Configuration**: [`LauncherEnvironment`], an explicit snapshot of the process
//!   environment from which the home directory and display hints are read.
//! - **Logging**: a `tracing` bootstrap that writes to `stderr` and honours `RUST_LOG`.
//!
//! ```rust,ignore
//! use verve_core::config::LauncherEnvironment;
//! use verve_core::logging::init_minimal_logging;
//!
//! init_minimal_logging(tracing::Level::WARN);
//! let env = LauncherEnvironment::from_process();
//! let home = env.home_dir()?;
//! ```

pub mod config;
pub mod error;
pub mod logging;

pub use config::{LauncherEnvironment, HOME_FALLBACK};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_minimal_logging, try_init_logging};
