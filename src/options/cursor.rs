use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cursor::Orientation;

/// Smallest cursor size the size slider allows (percent of view height).
pub const MIN_CURSOR_SIZE: f32 = 0.5;
/// Largest cursor size the size slider allows (percent of view height).
pub const MAX_CURSOR_SIZE: f32 = 20.0;

/// How the marker is oriented when the pointer is over empty space and no
/// surface normal exists.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FallbackOrientation {
    /// Face the camera (point back along the view direction).
    #[default]
    FaceCamera,
    /// Keep a fixed world-space axis regardless of the camera.
    WorldAxis {
        /// Axis the marker faces; normalized on use.
        axis: [f32; 3],
    },
}

impl FallbackOrientation {
    /// Resolve the policy for a view looking along `forward`.
    #[must_use]
    pub fn resolve(self, forward: Vec3) -> Orientation {
        match self {
            Self::FaceCamera => {
                Orientation::FaceCamera((-forward).normalize_or(Vec3::Z))
            }
            Self::WorldAxis { axis } => {
                Orientation::Fixed(Vec3::from(axis).normalize_or(Vec3::Z))
            }
        }
    }
}

/// User-facing cursor controls: the enable checkbox and the size slider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Virtual Cursor", inline)]
#[serde(default)]
pub struct CursorOptions {
    /// Replace the system pointer with the 3D cursor.
    #[schemars(title = "Enable")]
    pub enabled: bool,
    /// Cursor size as a percentage of the view height. Kept constant on
    /// screen regardless of zoom.
    #[schemars(
        title = "Size",
        range(min = MIN_CURSOR_SIZE, max = MAX_CURSOR_SIZE),
        extend("step" = 0.5)
    )]
    pub size: f32,
    /// Orientation used when no surface normal is available.
    #[schemars(skip)]
    pub fallback_orientation: FallbackOrientation,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 3.0,
            fallback_orientation: FallbackOrientation::FaceCamera,
        }
    }
}

impl CursorOptions {
    /// Clamp a requested size into the slider range. Non-finite input
    /// falls back to the default size.
    #[must_use]
    pub fn clamp_size(size: f32) -> f32 {
        if size.is_finite() {
            size.clamp(MIN_CURSOR_SIZE, MAX_CURSOR_SIZE)
        } else {
            Self::default().size
        }
    }
}
