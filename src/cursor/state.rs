use glam::{Quat, Vec3};

use crate::options::CursorOptions;
use crate::picking::NodeId;

/// Direction the cursor marker faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Flush with a hit surface; carries the unit surface normal.
    Surface(Vec3),
    /// Facing the camera; carries the unit direction toward the eye.
    FaceCamera(Vec3),
    /// A fixed world axis chosen by configuration.
    Fixed(Vec3),
}

impl Orientation {
    /// Unit direction the marker's +Z axis should point along.
    #[must_use]
    pub fn direction(self) -> Vec3 {
        match self {
            Self::Surface(dir) | Self::FaceCamera(dir) | Self::Fixed(dir) => {
                dir
            }
        }
    }

    /// Surface normal, if this orientation came from a hit.
    #[must_use]
    pub fn normal(self) -> Option<Vec3> {
        match self {
            Self::Surface(normal) => Some(normal),
            _ => None,
        }
    }

    /// Rotation taking the marker's local +Z onto
    /// [`direction`](Self::direction).
    #[must_use]
    pub fn rotation(self) -> Quat {
        Quat::from_rotation_arc(Vec3::Z, self.direction().normalize_or(Vec3::Z))
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::FaceCamera(Vec3::Z)
    }
}

/// Where a placement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementSource {
    /// Nearest geometry hit along the pointer ray.
    Surface(NodeId),
    /// No hit; the pointer ray crossed the camera focal plane.
    FocalPlane,
}

/// A resolved cursor placement for one pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World-space marker position.
    pub position: Vec3,
    /// Marker orientation.
    pub orientation: Orientation,
    /// World-space marker scale.
    pub scale: f32,
    /// World-space height of the view at the marker's depth; `scale` is
    /// `size%` of this.
    pub view_height: f32,
    /// Hit or focal-plane fallback.
    pub source: PlacementSource,
}

/// Outcome of projecting one pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorProjection {
    /// Nothing to show: cursor disabled or pointer outside the view.
    Hidden,
    /// Cursor placed in the scene.
    Placed(Placement),
}

impl CursorProjection {
    /// Whether the cursor should be shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    /// The placement, if any.
    #[must_use]
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Self::Placed(placement) => Some(placement),
            Self::Hidden => None,
        }
    }
}

/// World-space scale for a size given as a percentage of view height.
#[must_use]
pub fn marker_scale(size: f32, view_height: f32) -> f32 {
    size * 0.01 * view_height
}

/// The module's single cursor state.
///
/// `position` always holds the last placement; while `visible` is false it
/// is stale and must not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorState {
    /// Last placed world position.
    pub position: Vec3,
    /// Last placed orientation.
    pub orientation: Orientation,
    /// Configured size (percent of view height).
    pub size: f32,
    /// Last world-space scale.
    pub scale: f32,
    /// Whether the marker is currently shown.
    pub visible: bool,
    /// Whether the cursor is enabled.
    pub enabled: bool,
    /// Last placement source.
    pub source: Option<PlacementSource>,
    view_height: f32,
}

impl CursorState {
    /// Initial hidden state for the given configuration.
    #[must_use]
    pub fn new(options: &CursorOptions) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Orientation::default(),
            size: options.size,
            scale: 0.0,
            visible: false,
            enabled: options.enabled,
            source: None,
            view_height: 0.0,
        }
    }

    /// Fold a projection into the state. Hidden projections only clear
    /// `visible`; the previous placement is kept.
    pub fn apply(&mut self, projection: &CursorProjection) {
        match projection {
            CursorProjection::Hidden => self.visible = false,
            CursorProjection::Placed(p) => {
                self.position = p.position;
                self.orientation = p.orientation;
                self.scale = p.scale;
                self.view_height = p.view_height;
                self.source = Some(p.source);
                self.visible = true;
            }
        }
    }

    /// Change the configured size and recompute the world scale from the
    /// last known view height.
    pub fn resize(&mut self, size: f32) {
        self.size = size;
        self.scale = marker_scale(size, self.view_height);
    }
}
