use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::viewport::Viewport;
use crate::error::CursorError;
use crate::picking::Ray;

/// Smallest focal distance / determinant treated as non-degenerate.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// How the camera maps view space onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Perspective projection with a vertical field of view in degrees.
    Perspective {
        /// Vertical field of view in degrees.
        fovy: f32,
    },
    /// Parallel (orthographic) projection, as used by 2D slice views.
    Parallel {
        /// Half of the visible view height in world units.
        scale: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Self::Perspective { fovy: 30.0 }
    }
}

/// Camera defined by eye position, focal point, and projection parameters.
///
/// The focal point doubles as the look-at target, so the focal distance
/// is always `|focal_point - eye|`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Focal point in world space.
    pub focal_point: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Projection mode.
    pub projection: Projection,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Perspective camera looking from `eye` at `focal_point`.
    #[must_use]
    pub fn perspective(eye: Vec3, focal_point: Vec3, fovy: f32) -> Self {
        Self {
            eye,
            focal_point,
            up: Vec3::Y,
            projection: Projection::Perspective { fovy },
            znear: 0.1,
            zfar: 10_000.0,
        }
    }

    /// Parallel-projection camera with the given half view height.
    #[must_use]
    pub fn parallel(eye: Vec3, focal_point: Vec3, scale: f32) -> Self {
        Self {
            projection: Projection::Parallel { scale },
            ..Self::perspective(eye, focal_point, 30.0)
        }
    }

    /// Distance from the eye to the focal point.
    #[must_use]
    pub fn focal_distance(&self) -> f32 {
        (self.focal_point - self.eye).length()
    }

    /// Unit view direction (eye toward focal point).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.focal_point - self.eye).normalize_or_zero()
    }

    /// Build the view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.focal_point, self.up)
    }

    /// Build the projection matrix for the given viewport aspect ratio.
    #[must_use]
    pub fn build_projection(&self, aspect: f32) -> Mat4 {
        // perspective_rh / orthographic_rh use the [0,1] depth range
        match self.projection {
            Projection::Perspective { fovy } => Mat4::perspective_rh(
                fovy.to_radians(),
                aspect,
                self.znear,
                self.zfar,
            ),
            Projection::Parallel { scale } => Mat4::orthographic_rh(
                -scale * aspect,
                scale * aspect,
                -scale,
                scale,
                self.znear,
                self.zfar,
            ),
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self, aspect: f32) -> Mat4 {
        self.build_projection(aspect) * self.build_view()
    }

    /// Check that the camera can produce a usable transform.
    fn validate(&self) -> Result<(), CursorError> {
        if !(self.eye.is_finite()
            && self.focal_point.is_finite()
            && self.up.is_finite())
        {
            return Err(CursorError::ViewUnavailable(
                "camera has non-finite coordinates".into(),
            ));
        }
        if self.focal_distance() < DEGENERATE_EPSILON {
            return Err(CursorError::ViewUnavailable(
                "camera eye coincides with its focal point".into(),
            ));
        }
        if self.forward().cross(self.up).length_squared() < DEGENERATE_EPSILON
        {
            return Err(CursorError::ViewUnavailable(
                "camera up vector is parallel to the view direction".into(),
            ));
        }
        let projection_ok = match self.projection {
            Projection::Perspective { fovy } => fovy > 0.0 && fovy < 180.0,
            Projection::Parallel { scale } => scale > 0.0,
        };
        if !projection_ok || self.znear <= 0.0 || self.zfar <= self.znear {
            return Err(CursorError::ViewUnavailable(
                "camera projection parameters are out of range".into(),
            ));
        }
        Ok(())
    }

    /// Freeze this camera against a viewport into a [`CameraTransform`].
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ViewUnavailable`] when the camera or viewport
    /// is degenerate (empty viewport, coincident eye and focal point,
    /// singular view-projection).
    pub fn transform(
        &self,
        viewport: Viewport,
    ) -> Result<CameraTransform, CursorError> {
        if viewport.is_empty() {
            return Err(CursorError::ViewUnavailable(
                "viewport has zero size".into(),
            ));
        }
        self.validate()?;

        let view_proj = self.build_matrix(viewport.aspect());
        let det = view_proj.determinant();
        if !det.is_finite() || det.abs() < f32::EPSILON * f32::EPSILON {
            return Err(CursorError::ViewUnavailable(
                "view-projection matrix is singular".into(),
            ));
        }

        Ok(CameraTransform {
            eye: self.eye,
            forward: self.forward(),
            focal_distance: self.focal_distance(),
            projection: self.projection,
            viewport,
            inv_view_proj: view_proj.inverse(),
        })
    }
}

/// A camera resolved against a viewport: everything needed to turn pixels
/// into world-space rays and world distances into pixel sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransform {
    eye: Vec3,
    forward: Vec3,
    focal_distance: f32,
    projection: Projection,
    viewport: Viewport,
    inv_view_proj: Mat4,
}

impl CameraTransform {
    /// Eye position in world space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Distance from eye to focal plane.
    #[must_use]
    pub fn focal_distance(&self) -> f32 {
        self.focal_distance
    }

    /// Viewport the transform was built for.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Convert pixel coordinates (origin top-left) to a world-space ray.
    ///
    /// The ray starts on the near plane and points toward the far plane.
    #[must_use]
    pub fn screen_to_ray(&self, pointer: Vec2) -> Ray {
        let ndc = self.viewport.to_ndc(pointer);

        let near = self.inv_view_proj.project_point3(ndc.extend(0.0));
        let far = self.inv_view_proj.project_point3(ndc.extend(1.0));

        Ray::new(near, far - near)
    }

    /// Point where `ray` crosses the focal plane (the plane through the
    /// focal point, perpendicular to the view direction).
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ViewUnavailable`] if the ray runs parallel to
    /// the focal plane, which only happens for a corrupt transform.
    pub fn focal_plane_point(&self, ray: &Ray) -> Result<Vec3, CursorError> {
        let plane_point = self.eye + self.forward * self.focal_distance;
        let denom = ray.direction.dot(self.forward);
        if denom.abs() < DEGENERATE_EPSILON {
            return Err(CursorError::ViewUnavailable(
                "pointer ray is parallel to the focal plane".into(),
            ));
        }
        let t = (plane_point - ray.origin).dot(self.forward) / denom;
        Ok(ray.at(t))
    }

    /// World-space size of one pixel at the depth of `point`.
    ///
    /// Perspective views grow linearly with depth along the view direction;
    /// parallel views are depth-independent.
    #[must_use]
    pub fn units_per_pixel_at(&self, point: Vec3) -> f32 {
        let height = self.viewport.height as f32;
        match self.projection {
            Projection::Perspective { fovy } => {
                let depth = (point - self.eye).dot(self.forward).max(0.0);
                2.0 * depth * (fovy.to_radians() * 0.5).tan() / height
            }
            Projection::Parallel { scale } => 2.0 * scale / height,
        }
    }
}
