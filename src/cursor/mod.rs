//! The virtual cursor: state, projection, marker output, and the module
//! instance tying them to pointer events and user controls.

mod controller;
mod marker;
mod projector;
mod state;

pub use controller::{PointerShape, UpdateOutcome, VirtualCursor};
pub use marker::{apply_placement, Marker, MarkerNode};
pub use projector::CursorProjector;
pub use state::{
    marker_scale, CursorProjection, CursorState, Orientation, Placement,
    PlacementSource,
};
