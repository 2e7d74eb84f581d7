//! The marker node the cursor drives.

use glam::Vec3;

use super::state::{Orientation, Placement};
use crate::options::MarkerOptions;

/// Output side of the cursor: a persistent marker entity in the host's
/// scene graph. Borrowed per call, never retained.
pub trait Marker {
    /// Move the marker.
    fn set_position(&mut self, position: Vec3);
    /// Orient the marker (surface normal or fallback).
    fn set_orientation(&mut self, orientation: Orientation);
    /// Set the world-space marker scale.
    fn set_scale(&mut self, scale: f32);
    /// Show or hide the marker.
    fn set_visible(&mut self, visible: bool);
    /// Apply display properties. Hosts without such properties can ignore
    /// this.
    fn set_appearance(&mut self, _appearance: &MarkerOptions) {}
}

/// Push a placement's transform to a marker (visibility is left to the
/// caller).
pub fn apply_placement<M>(marker: &mut M, placement: &Placement)
where
    M: Marker + ?Sized,
{
    marker.set_position(placement.position);
    marker.set_orientation(placement.orientation);
    marker.set_scale(placement.scale);
}

/// Plain in-memory marker. Useful for headless hosts and as a record of
/// what a renderer would have been told.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerNode {
    /// Current position.
    pub position: Vec3,
    /// Current orientation.
    pub orientation: Orientation,
    /// Current world scale.
    pub scale: f32,
    /// Current visibility.
    pub visible: bool,
    /// Current display properties.
    pub appearance: MarkerOptions,
    /// Number of transform updates received.
    pub updates: u64,
}

impl Default for MarkerNode {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Orientation::default(),
            scale: 1.0,
            visible: false,
            appearance: MarkerOptions::default(),
            updates: 0,
        }
    }
}

impl Marker for MarkerNode {
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.updates += 1;
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_appearance(&mut self, appearance: &MarkerOptions) {
        self.appearance.clone_from(appearance);
    }
}
