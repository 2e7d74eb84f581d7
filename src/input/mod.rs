//! Input handling: the pointer events that drive the cursor.

/// Platform-agnostic input events.
pub mod event;

pub use event::InputEvent;
