//! # Display Management
//!
//! Resolves the name of the display the launcher was started on, in the form a
//! run-dialog provider can use to put its window on that same display.
//!
//! Backends are tried the way GDK picks them: `GDK_BACKEND` wins when set, otherwise
//! Wayland is tried before X11. Whichever connects first names the display:
//!
//! - **X11**: the `DISPLAY` string with the default screen number substituted in,
//!   so `:0` becomes `:0.0` and `host:10.0` stays `host:10.0`.
//! - **Wayland**: the `WAYLAND_DISPLAY` socket name (`wayland-0` when unset).
//!
//! Nothing is cached; every call talks to the display server again.

use std::fmt;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

use thiserror::Error;
use verve_core::config::LauncherEnvironment;
use verve_core::error::ConfigError;
use x11rb::connection::Connection as _;
use x11rb::rust_connection::RustConnection;

/// Socket name libwayland falls back to when `WAYLAND_DISPLAY` is unset.
pub const DEFAULT_WAYLAND_DISPLAY: &str = "wayland-0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayBackend {
    Wayland,
    X11,
}

impl DisplayBackend {
    /// Order used when the user expresses no preference.
    pub const DEFAULT_ORDER: [DisplayBackend; 2] = [DisplayBackend::Wayland, DisplayBackend::X11];
}

impl fmt::Display for DisplayBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayBackend::Wayland => f.write_str("wayland"),
            DisplayBackend::X11 => f.write_str("x11"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("DISPLAY is not set")]
    X11DisplayUnset,

    #[error("Failed to connect to X11 display {display:?}")]
    X11Connect {
        display: String,
        #[source]
        source: x11rb::errors::ConnectError,
    },

    #[error("X11 display {display:?} has no screen {screen}")]
    NoSuchScreen { display: String, screen: usize },

    #[error("XDG_RUNTIME_DIR is not set; cannot locate Wayland socket {0:?}")]
    RuntimeDirUnset(String),

    #[error("Failed to open Wayland socket {path:?}")]
    WaylandSocket {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to set up Wayland connection on {path:?}")]
    WaylandConnect {
        path: PathBuf,
        #[source]
        source: wayland_client::ConnectError,
    },

    #[error("Wayland compositor on {path:?} did not answer")]
    WaylandRoundtrip {
        path: PathBuf,
        #[source]
        source: wayland_client::backend::WaylandError,
    },

    #[error("GDK_BACKEND={0:?} names no supported display backend")]
    UnsupportedBackend(String),

    #[error("No display available ({})", format_attempts(.attempts))]
    NoDisplay { attempts: Vec<(DisplayBackend, String)> },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn format_attempts(attempts: &[(DisplayBackend, String)]) -> String {
    attempts
        .iter()
        .map(|(backend, reason)| format!("{backend}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

// ANCHOR: DisplayQueryTrait
/// Answers "which display is the invoking user on?".
pub trait DisplayQuery {
    fn default_display_name(&self, env: &LauncherEnvironment) -> Result<String, DisplayError>;
}

/// Low-level connectivity checks against live display servers.
pub trait DisplayProbe {
    /// Connects to the X11 server named by `display`, returning its default screen number.
    fn x11_default_screen(&self, display: &str) -> Result<usize, DisplayError>;

    /// Connects to the Wayland compositor listening on `socket`.
    fn wayland_connect(&self, socket: &Path) -> Result<(), DisplayError>;
}

/// Probe backed by real sockets.
#[derive(Debug, Default, Clone, Copy)]
pub struct ServerProbe;

impl DisplayProbe for ServerProbe {
    fn x11_default_screen(&self, display: &str) -> Result<usize, DisplayError> {
        let (conn, screen) = RustConnection::connect(Some(display)).map_err(|source| DisplayError::X11Connect {
            display: display.to_owned(),
            source,
        })?;

        if conn.setup().roots.get(screen).is_none() {
            return Err(DisplayError::NoSuchScreen {
                display: display.to_owned(),
                screen,
            });
        }
        Ok(screen)
    }

    fn wayland_connect(&self, socket: &Path) -> Result<(), DisplayError> {
        let stream = UnixStream::connect(socket).map_err(|source| DisplayError::WaylandSocket {
            path: socket.to_owned(),
            source,
        })?;
        let conn = wayland_client::Connection::from_socket(stream).map_err(|source| DisplayError::WaylandConnect {
            path: socket.to_owned(),
            source,
        })?;
        conn.roundtrip().map_err(|source| DisplayError::WaylandRoundtrip {
            path: socket.to_owned(),
            source,
        })?;
        Ok(())
    }
}

// ANCHOR: SystemDisplayQuery
/// Production [`DisplayQuery`]: picks a backend, probes it and names the display.
#[derive(Debug, Default, Clone)]
pub struct SystemDisplayQuery<P = ServerProbe> {
    probe: P,
}

impl SystemDisplayQuery {
    pub fn new() -> Self {
        Self { probe: ServerProbe }
    }
}

impl<P: DisplayProbe> SystemDisplayQuery<P> {
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    fn query_backend(&self, backend: DisplayBackend, env: &LauncherEnvironment) -> Result<String, DisplayError> {
        match backend {
            DisplayBackend::X11 => {
                let display = env.x11_display()?.ok_or(DisplayError::X11DisplayUnset)?;
                let screen = self.probe.x11_default_screen(display)?;
                Ok(make_x11_display_name(display, screen))
            }
            DisplayBackend::Wayland => {
                let name = env.wayland_display()?.unwrap_or(DEFAULT_WAYLAND_DISPLAY);
                let socket = wayland_socket_path(name, env.xdg_runtime_dir().as_deref())?;
                self.probe.wayland_connect(&socket)?;
                Ok(name.to_owned())
            }
        }
    }
}

impl<P: DisplayProbe> DisplayQuery for SystemDisplayQuery<P> {
    fn default_display_name(&self, env: &LauncherEnvironment) -> Result<String, DisplayError> {
        let backends = backend_order(env.gdk_backend()?)?;
        let mut attempts = Vec::with_capacity(backends.len());

        for backend in backends {
            match self.query_backend(backend, env) {
                Ok(name) => {
                    tracing::debug!(%backend, display_name = %name, "Resolved default display");
                    return Ok(name);
                }
                Err(e) => {
                    tracing::debug!(%backend, error = %e, "Display backend unavailable");
                    attempts.push((backend, e.to_string()));
                }
            }
        }

        Err(DisplayError::NoDisplay { attempts })
    }
}

/// Expands a `GDK_BACKEND`-style preference list into backends to try, in order.
///
/// Entries naming backends this crate cannot probe (`broadway`, `win32`, ...) are
/// skipped. `*` stands for the default order.
pub fn backend_order(preference: Option<&str>) -> Result<Vec<DisplayBackend>, DisplayError> {
    let Some(preference) = preference else {
        return Ok(DisplayBackend::DEFAULT_ORDER.to_vec());
    };

    let mut order = Vec::new();
    for entry in preference.split(',').map(str::trim) {
        let candidates: &[DisplayBackend] = match entry {
            "wayland" => &[DisplayBackend::Wayland],
            "x11" => &[DisplayBackend::X11],
            "*" => &DisplayBackend::DEFAULT_ORDER,
            _ => &[],
        };
        for backend in candidates {
            if !order.contains(backend) {
                order.push(*backend);
            }
        }
    }

    if order.is_empty() {
        return Err(DisplayError::UnsupportedBackend(preference.to_owned()));
    }
    Ok(order)
}

/// Builds the canonical X11 display name for `screen` on `display`.
///
/// Any screen suffix already present (a `.` after the first `:`) is replaced.
pub fn make_x11_display_name(display: &str, screen: usize) -> String {
    let base = match (display.rfind('.'), display.find(':')) {
        (Some(dot), Some(colon)) if dot > colon => &display[..dot],
        (Some(dot), None) => &display[..dot],
        _ => display,
    };
    format!("{base}.{screen}")
}

/// Locates the Wayland socket for `name`. Absolute names are used as-is.
pub fn wayland_socket_path(name: &str, runtime_dir: Option<&Path>) -> Result<PathBuf, DisplayError> {
    let name_path = Path::new(name);
    if name_path.is_absolute() {
        return Ok(name_path.to_owned());
    }
    runtime_dir
        .map(|dir| dir.join(name_path))
        .ok_or_else(|| DisplayError::RuntimeDirUnset(name.to_owned()))
}
