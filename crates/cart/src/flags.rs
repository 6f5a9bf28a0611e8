//! Ephemeral controller flags shared by the controller and the notice manager.

use std::sync::Arc;

use tokio::sync::watch;

/// `processing` is written only by the controller, `show_error` only by the
/// notice manager. Both start false on mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerFlags {
    /// A cart mutation is in flight.
    pub processing: bool,
    /// A failure notice is visible.
    pub show_error: bool,
}

pub(crate) type SharedFlags = Arc<watch::Sender<ControllerFlags>>;

pub(crate) fn shared() -> SharedFlags {
    Arc::new(watch::Sender::new(ControllerFlags::default()))
}
