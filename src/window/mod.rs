pub mod decorator;
pub mod interaction;
pub mod manifest;
pub mod registry;

use std::fmt;

pub use interaction::{DragState, ExpandHint, Interaction, InteractionController, ResizeState};
pub use manifest::{Manifest, WindowSpec};
pub use registry::{DockMode, GeometryPatch, Registry, WindowRecord};

/// Stable identifier of a window, shared with the content manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u16);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for WindowId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
