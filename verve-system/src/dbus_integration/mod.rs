//! Session-bus plumbing shared by the launcher clients.

mod manager;

pub use manager::SessionBus;

// ANCHOR: BusTargets
/// A remote object addressed on the bus: well-known service name, object path
/// and the interface calls are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusTarget {
    pub service: &'static str,
    pub path: &'static str,
    pub interface: &'static str,
}

/// The run dialog provider (`OpenDialog`).
pub const RUN_DIALOG: BusTarget = BusTarget {
    service: "org.xfce.RunDialog",
    path: "/org/xfce/RunDialog",
    interface: "org.xfce.RunDialog",
};

/// The Verve panel plugin's own interface (`GrabFocus`), exported on the same object.
pub const VERVE: BusTarget = BusTarget {
    service: "org.xfce.Verve",
    path: "/org/xfce/RunDialog",
    interface: "org.xfce.Verve",
};
