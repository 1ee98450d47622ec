use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use crate::error::ConfigError;

// ANCHOR: EnvironmentKeys
/// Passed in place of the home directory when `HOME` is not set. Never expanded.
pub const HOME_FALLBACK: &str = "~/";

const HOME: &str = "HOME";
const DISPLAY: &str = "DISPLAY";
const WAYLAND_DISPLAY: &str = "WAYLAND_DISPLAY";
const XDG_RUNTIME_DIR: &str = "XDG_RUNTIME_DIR";
const GDK_BACKEND: &str = "GDK_BACKEND";

// ANCHOR: LauncherEnvironmentStruct
/// An immutable snapshot of environment variables.
///
/// Lookups never touch the live process environment, which keeps them
/// deterministic under test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LauncherEnvironment {
    vars: HashMap<OsString, OsString>,
}

impl LauncherEnvironment {
    /// Builds a snapshot from arbitrary `(key, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Snapshots the current process environment.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Raw lookup of a variable.
    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    /// UTF-8 lookup of a variable. Absent keys yield `Ok(None)`.
    pub fn get(&self, key: &'static str) -> Result<Option<&str>, ConfigError> {
        match self.get_os(key) {
            None => Ok(None),
            Some(value) => value.to_str().map(Some).ok_or_else(|| ConfigError::NotUnicode {
                key,
                value: value.to_os_string(),
            }),
        }
    }

    // ANCHOR: HomeDirLookup
    /// The home directory handed to the run dialog.
    ///
    /// Returns `HOME` exactly as set (an empty value included), or
    /// [`HOME_FALLBACK`] when it is absent.
    pub fn home_dir(&self) -> Result<String, ConfigError> {
        Ok(self.get(HOME)?.unwrap_or(HOME_FALLBACK).to_owned())
    }

    /// The X11 display string (`DISPLAY`), if set and non-empty.
    pub fn x11_display(&self) -> Result<Option<&str>, ConfigError> {
        Ok(self.get(DISPLAY)?.filter(|d| !d.is_empty()))
    }

    /// The Wayland socket name (`WAYLAND_DISPLAY`), if set and non-empty.
    pub fn wayland_display(&self) -> Result<Option<&str>, ConfigError> {
        Ok(self.get(WAYLAND_DISPLAY)?.filter(|d| !d.is_empty()))
    }

    /// `XDG_RUNTIME_DIR`, where relative Wayland sockets live.
    pub fn xdg_runtime_dir(&self) -> Option<PathBuf> {
        self.get_os(XDG_RUNTIME_DIR)
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
    }

    /// `GDK_BACKEND`, the user's display backend preference list.
    pub fn gdk_backend(&self) -> Result<Option<&str>, ConfigError> {
        Ok(self.get(GDK_BACKEND)?.map(str::trim).filter(|b| !b.is_empty()))
    }
}
