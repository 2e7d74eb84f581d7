//! Render-view context: the read-only window into a hovered view that the
//! cursor projector queries on each pointer move.

use glam::Vec3;

use crate::camera::{Camera, CameraTransform, Viewport};
use crate::error::CursorError;
use crate::picking::{Hit, Ray, Scene};

/// What the cursor needs from a render view.
///
/// Implementations are borrowed handles into the host's view and scene
/// graph, valid only for the duration of one call.
pub trait ViewContext {
    /// Camera resolved against the current viewport.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ViewUnavailable`] when the view has no usable
    /// camera yet.
    fn camera_transform(&self) -> Result<CameraTransform, CursorError>;

    /// Nearest visible geometry hit along `ray`.
    fn pick(&self, ray: &Ray) -> Option<Hit>;

    /// Distance from the eye to the focal plane.
    ///
    /// # Errors
    ///
    /// Same as [`ViewContext::camera_transform`].
    fn focal_distance(&self) -> Result<f32, CursorError> {
        self.camera_transform().map(|xf| xf.focal_distance())
    }

    /// Viewport the camera transform was resolved against.
    ///
    /// # Errors
    ///
    /// Same as [`ViewContext::camera_transform`].
    fn viewport(&self) -> Result<Viewport, CursorError> {
        self.camera_transform().map(|xf| xf.viewport())
    }

    /// World-space size of one pixel at the depth of `point`.
    ///
    /// # Errors
    ///
    /// Same as [`ViewContext::camera_transform`].
    fn view_scale_at(&self, point: Vec3) -> Result<f32, CursorError> {
        self.camera_transform().map(|xf| xf.units_per_pixel_at(point))
    }
}

/// A render view built from plain parts: an optional camera (absent until
/// the view is initialized), its viewport, and the scene it shows.
///
/// 2D slice views are modeled as parallel-projection views whose focal
/// plane is the slice plane.
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    /// Camera, `None` while the view is not initialized.
    pub camera: Option<&'a Camera>,
    /// Viewport size in pixels.
    pub viewport: Viewport,
    /// Scene content shown in the view.
    pub scene: &'a Scene,
}

impl<'a> RenderView<'a> {
    /// Borrow a camera, viewport and scene as a view context.
    #[must_use]
    pub const fn new(
        camera: &'a Camera,
        viewport: Viewport,
        scene: &'a Scene,
    ) -> Self {
        Self {
            camera: Some(camera),
            viewport,
            scene,
        }
    }

    /// A view whose camera has not been set up yet.
    #[must_use]
    pub const fn uninitialized(viewport: Viewport, scene: &'a Scene) -> Self {
        Self {
            camera: None,
            viewport,
            scene,
        }
    }
}

impl ViewContext for RenderView<'_> {
    fn camera_transform(&self) -> Result<CameraTransform, CursorError> {
        self.camera
            .ok_or_else(|| {
                CursorError::ViewUnavailable("view has no camera".into())
            })?
            .transform(self.viewport)
    }

    fn pick(&self, ray: &Ray) -> Option<Hit> {
        self.scene.pick(ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_view_is_unavailable() {
        let scene = Scene::new();
        let view = RenderView::uninitialized(Viewport::new(10, 10), &scene);
        assert!(matches!(
            view.camera_transform(),
            Err(CursorError::ViewUnavailable(_))
        ));
        assert!(view.focal_distance().is_err());
    }

    #[test]
    fn default_queries_come_from_camera() {
        let scene = Scene::new();
        let camera = Camera::perspective(Vec3::ZERO, Vec3::NEG_Z * 10.0, 90.0);
        let view = RenderView::new(&camera, Viewport::new(200, 200), &scene);
        assert!((view.focal_distance().unwrap() - 10.0).abs() < 1e-5);
        assert_eq!(view.viewport().unwrap(), Viewport::new(200, 200));
        // 90° fov: view height at depth 10 is 20 units over 200 px.
        let scale = view.view_scale_at(Vec3::NEG_Z * 10.0).unwrap();
        assert!((scale - 0.1).abs() < 1e-4);
    }
}
