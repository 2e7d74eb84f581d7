//! CPU ray picking against scene geometry.
//!
//! Casts a world-space ray against surface meshes, spheres, boxes, and
//! volume proxies and reports the nearest intersection with its surface
//! normal.

mod primitives;
mod ray;
mod scene;
mod volume;

use glam::Vec3;
pub use primitives::{Aabb, Sphere, TriangleMesh};
pub use ray::Ray;
pub use scene::{Geometry, NodeId, Scene, SceneNode};
pub use volume::VolumeProxy;

/// Hits closer than this along the ray are ignored (self-intersection
/// guard).
pub(crate) const MIN_HIT_DISTANCE: f32 = 1e-5;

/// A ray/geometry intersection in the geometry's own terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Distance along the ray.
    pub distance: f32,
    /// Unit surface normal at the hit, if the geometry defines one. Always
    /// faces back toward the ray origin.
    pub normal: Option<Vec3>,
}

/// Unit `normal` turned to face against `ray`, so back faces and hits from
/// inside a closed surface point toward the viewer. `None` for a
/// degenerate normal.
pub(crate) fn facing_normal(normal: Vec3, ray: &Ray) -> Option<Vec3> {
    let normal = normal.normalize_or_zero();
    if normal == Vec3::ZERO {
        None
    } else if normal.dot(ray.direction) > 0.0 {
        Some(-normal)
    } else {
        Some(normal)
    }
}

/// Result of picking a scene: nearest hit along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// World-space intersection point.
    pub point: Vec3,
    /// Unit surface normal at the hit, if available.
    pub normal: Option<Vec3>,
    /// Distance from the ray origin.
    pub distance: f32,
    /// Scene node that was hit.
    pub node: NodeId,
}

/// Anything a ray can be tested against.
pub trait Pickable {
    /// Nearest intersection in front of the ray origin, if any.
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;
}
