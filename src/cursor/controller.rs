//! The module instance: owns the cursor state and configuration, reacts to
//! pointer events and user controls, and drives a borrowed marker.

use glam::Vec2;

use super::marker::{apply_placement, Marker};
use super::projector::CursorProjector;
use super::state::{CursorProjection, CursorState, Placement, PlacementSource};
use crate::error::CursorError;
use crate::input::InputEvent;
use crate::options::{
    CursorOptions, FallbackOrientation, Options, ParameterNode,
};
use crate::view::ViewContext;

/// System pointer shape the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerShape {
    /// Regular arrow; the virtual cursor is not covering the pointer.
    #[default]
    Arrow,
    /// Blank pointer; the virtual cursor replaces it.
    Hidden,
}

/// What a pointer event did to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Cursor disabled; event ignored.
    Disabled,
    /// Marker hidden (pointer left the views or the viewport).
    Hidden,
    /// Marker placed.
    Placed(PlacementSource),
    /// View unavailable; previous state kept.
    Skipped,
}

/// Virtual cursor module instance.
#[derive(Debug, Clone)]
pub struct VirtualCursor {
    options: Options,
    state: CursorState,
    projector: CursorProjector,
    pointer_shape: PointerShape,
    appearance_applied: bool,
}

impl VirtualCursor {
    /// Create the module with the given options. The marker stays hidden
    /// until the first pointer move, which also applies the marker
    /// appearance.
    #[must_use]
    pub fn new(mut options: Options) -> Self {
        options.cursor.size = CursorOptions::clamp_size(options.cursor.size);
        let state = CursorState::new(&options.cursor);
        Self {
            options,
            state,
            projector: CursorProjector::new(),
            pointer_shape: PointerShape::Arrow,
            appearance_applied: false,
        }
    }

    /// Current cursor state.
    #[must_use]
    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// System pointer shape the host should display.
    #[must_use]
    pub fn pointer_shape(&self) -> PointerShape {
        self.pointer_shape
    }

    /// Whether the cursor is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.options.cursor.enabled
    }

    /// Enable checkbox.
    ///
    /// Enabling applies the marker appearance and keeps the marker hidden
    /// until the pointer moves. Disabling hides the marker and restores
    /// the arrow pointer.
    pub fn set_enabled(&mut self, enabled: bool, marker: &mut dyn Marker) {
        self.options.cursor.enabled = enabled;
        self.state.enabled = enabled;
        self.appearance_applied = enabled;
        if enabled {
            marker.set_appearance(&self.options.marker);
            log::debug!("Virtual cursor enabled");
        } else {
            log::debug!("Virtual cursor disabled");
        }
        marker.set_visible(false);
        self.state.visible = false;
        self.pointer_shape = PointerShape::Arrow;
    }

    /// Size slider. The value is clamped to the slider range; a visible
    /// marker is rescaled immediately. Returns the applied size.
    pub fn set_size(&mut self, size: f32, marker: &mut dyn Marker) -> f32 {
        let size = CursorOptions::clamp_size(size);
        self.options.cursor.size = size;
        self.state.resize(size);
        if self.state.visible {
            marker.set_scale(self.state.scale);
        }
        size
    }

    /// Change the orientation used when no surface normal is available.
    /// Takes effect on the next pointer move.
    pub fn set_fallback_orientation(&mut self, policy: FallbackOrientation) {
        self.options.cursor.fallback_orientation = policy;
    }

    /// Handle a pointer event. `view` is the hovered render view, if any.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        view: Option<&dyn ViewContext>,
        marker: &mut dyn Marker,
    ) -> UpdateOutcome {
        if !self.options.cursor.enabled {
            return UpdateOutcome::Disabled;
        }

        let (InputEvent::CursorMoved { x, y }, Some(view)) = (event, view)
        else {
            self.hide(marker);
            return UpdateOutcome::Hidden;
        };

        let pointer = Vec2::new(x, y);
        match self.projector.project(pointer, view, &self.options.cursor) {
            Ok(CursorProjection::Placed(placement)) => {
                self.show(&placement, marker);
                UpdateOutcome::Placed(placement.source)
            }
            Ok(CursorProjection::Hidden) => {
                self.hide(marker);
                UpdateOutcome::Hidden
            }
            Err(e) => {
                log::debug!("Skipping cursor update: {e}");
                UpdateOutcome::Skipped
            }
        }
    }

    /// The host scene is closing: drop the cursor.
    pub fn on_scene_close(&mut self, marker: &mut dyn Marker) {
        self.set_enabled(false, marker);
    }

    /// Pull enable/size from the parameter node into the widget state.
    /// Only values that differ are applied. Returns `true` if anything
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::InvalidParameter`] if the node holds values
    /// that cannot be parsed; nothing is applied in that case.
    pub fn sync_from_parameters(
        &mut self,
        params: &ParameterNode,
        marker: &mut dyn Marker,
    ) -> Result<bool, CursorError> {
        let parsed = params.cursor_options(&self.options.cursor)?;
        let mut changed = false;
        if parsed.enabled != self.options.cursor.enabled {
            self.set_enabled(parsed.enabled, marker);
            changed = true;
        }
        if parsed.size != self.options.cursor.size {
            let _ = self.set_size(parsed.size, marker);
            changed = true;
        }
        Ok(changed)
    }

    /// Push enable/size into the parameter node. Returns `true` if the node
    /// changed.
    pub fn sync_to_parameters(&self, params: &mut ParameterNode) -> bool {
        params.store(&self.options.cursor)
    }

    fn show(&mut self, placement: &Placement, marker: &mut dyn Marker) {
        self.state.apply(&CursorProjection::Placed(*placement));
        if !self.appearance_applied {
            marker.set_appearance(&self.options.marker);
            self.appearance_applied = true;
        }
        apply_placement(marker, placement);
        if self.pointer_shape != PointerShape::Hidden {
            self.pointer_shape = PointerShape::Hidden;
            marker.set_visible(true);
        }
        log::trace!(
            "Cursor at {:?} ({:?})",
            placement.position,
            placement.source
        );
    }

    fn hide(&mut self, marker: &mut dyn Marker) {
        self.state.apply(&CursorProjection::Hidden);
        if self.pointer_shape != PointerShape::Arrow {
            self.pointer_shape = PointerShape::Arrow;
            marker.set_visible(false);
        }
    }
}

impl Default for VirtualCursor {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
