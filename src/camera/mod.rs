//! Camera model for render views.
//!
//! Provides perspective and parallel cameras, viewport/NDC conversion, and
//! the unprojection used to turn pointer pixels into world-space rays.

/// Camera struct, projection modes, and the resolved camera transform.
pub mod core;
/// Viewport dimensions and pixel/NDC conversion.
pub mod viewport;

pub use self::core::{Camera, CameraTransform, Projection};
pub use viewport::Viewport;
