use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Display properties applied to the marker node when the cursor is
/// enabled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Marker", inline)]
#[serde(default)]
pub struct MarkerOptions {
    /// Marker opacity. Anything below 1.0 keeps the marker out of the
    /// depth buffer so it is never picked by the host's own hit tests.
    pub opacity: f32,
    /// Keep drawing the marker when it is occluded by other geometry.
    pub occluded_visible: bool,
    /// Opacity of the occluded part.
    pub occluded_opacity: f32,
    /// Marker label; empty to draw the glyph alone.
    pub label: String,
    /// Locked markers ignore interaction (no dragging).
    pub locked: bool,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            opacity: 0.9999,
            occluded_visible: true,
            occluded_opacity: 0.3,
            label: String::new(),
            locked: true,
        }
    }
}
