//! Configuration for the Verve launchers.
//!
//! The launchers take no flags and read no configuration files. Everything they
//! need comes from the process environment, captured once into a
//! [`LauncherEnvironment`] so callers (and tests) can inject their own mapping.

mod environment;

pub use environment::{LauncherEnvironment, HOME_FALLBACK};
