//! Analytic pick primitives: spheres, axis-aligned boxes, triangle meshes.

use glam::Vec3;

use super::{facing_normal, Intersection, Pickable, Ray, MIN_HIT_DISTANCE};
use crate::error::CursorError;

/// Determinant below which a ray is treated as parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-10;

/// Sphere pick proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center in world space.
    pub center: Vec3,
    /// Radius in world units.
    pub radius: f32,
}

impl Sphere {
    /// Create a sphere.
    #[must_use]
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Pickable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = (-b - root) / (2.0 * a);
        // Origin inside the sphere: take the far intersection.
        let t = if near > MIN_HIT_DISTANCE {
            near
        } else {
            (-b + root) / (2.0 * a)
        };
        if t <= MIN_HIT_DISTANCE {
            return None;
        }

        Some(Intersection {
            distance: t,
            normal: facing_normal(ray.at(t) - self.center, ray),
        })
    }
}

/// Axis-aligned bounding box.
///
/// Used directly as a pick proxy for volume renderings without an opacity
/// threshold, and as the bounds of meshes and volume proxies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

/// Entry and exit of a ray through a box.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Slab {
    pub(crate) t_enter: f32,
    pub(crate) t_exit: f32,
    pub(crate) enter_normal: Vec3,
    pub(crate) exit_normal: Vec3,
}

impl Aabb {
    /// Create a box from two corners (in any order).
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box from its center and full edge lengths.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Tightest box around a set of points; `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(first, first), |acc, &p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Slab test. Returns the parametric entry/exit of the ray, or `None`
    /// when the box is missed, lies entirely behind the origin, or the ray
    /// has no direction.
    pub(crate) fn slab(&self, ray: &Ray) -> Option<Slab> {
        if ray.direction == Vec3::ZERO {
            return None;
        }
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_normal = Vec3::ZERO;
        let mut exit_normal = Vec3::ZERO;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir.abs() < f32::EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let t1 = (lo - origin) / dir;
            let t2 = (hi - origin) / dir;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            let axis_dir = Vec3::AXES[axis] * dir.signum();

            if near > t_enter {
                t_enter = near;
                enter_normal = -axis_dir;
            }
            if far < t_exit {
                t_exit = far;
                exit_normal = axis_dir;
            }
        }

        if !(t_enter.is_finite() && t_exit.is_finite())
            || t_enter > t_exit
            || t_exit < MIN_HIT_DISTANCE
        {
            return None;
        }
        Some(Slab {
            t_enter,
            t_exit,
            enter_normal,
            exit_normal,
        })
    }
}

impl Pickable for Aabb {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let slab = self.slab(ray)?;
        let (distance, normal) = if slab.t_enter > MIN_HIT_DISTANCE {
            (slab.t_enter, slab.enter_normal)
        } else {
            (slab.t_exit, slab.exit_normal)
        };
        Some(Intersection {
            distance,
            normal: facing_normal(normal, ray),
        })
    }
}

/// Indexed triangle surface mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    bounds: Option<Aabb>,
}

impl TriangleMesh {
    /// Build a mesh from vertex positions and triangle indices.
    ///
    /// Normals follow the triangle winding (counter-clockwise is front).
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::InvalidGeometry`] if a triangle references a
    /// vertex that does not exist.
    pub fn new(
        positions: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, CursorError> {
        let vertex_count = positions.len();
        if let Some(bad) = triangles
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(CursorError::InvalidGeometry(format!(
                "triangle index {bad} out of range for {vertex_count} \
                 vertices"
            )));
        }
        let bounds = Aabb::from_points(&positions);
        Ok(Self {
            positions,
            triangles,
            bounds,
        })
    }

    /// Square patch centered at `center`, facing `normal`, with the given
    /// half edge length.
    #[must_use]
    pub fn quad(center: Vec3, normal: Vec3, half_extent: f32) -> Self {
        let n = normal.normalize_or(Vec3::Z);
        let u = n.any_orthonormal_vector() * half_extent;
        let v = n.cross(u.normalize_or_zero()) * half_extent;
        let positions = vec![
            center - u - v,
            center + u - v,
            center + u + v,
            center - u + v,
        ];
        let bounds = Aabb::from_points(&positions);
        Self {
            positions,
            triangles: vec![[0, 1, 2], [0, 2, 3]],
            bounds,
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Bounding box, `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    fn corners(&self, tri: [u32; 3]) -> (Vec3, Vec3, Vec3) {
        (
            self.positions[tri[0] as usize],
            self.positions[tri[1] as usize],
            self.positions[tri[2] as usize],
        )
    }
}

impl Pickable for TriangleMesh {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let _ = self.bounds?.slab(ray)?;

        self.triangles
            .iter()
            .filter_map(|&tri| {
                let (a, b, c) = self.corners(tri);
                intersect_triangle(ray, a, b, c)
            })
            .min_by(|x, y| x.distance.total_cmp(&y.distance))
    }
}

/// Möller–Trumbore ray/triangle test.
fn intersect_triangle(
    ray: &Ray,
    a: Vec3,
    b: Vec3,
    c: Vec3,
) -> Option<Intersection> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    if t <= MIN_HIT_DISTANCE {
        return None;
    }
    Some(Intersection {
        distance: t,
        normal: facing_normal(e1.cross(e2), ray),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_z(from: Vec3) -> Ray {
        Ray::new(from, Vec3::NEG_Z)
    }

    #[test]
    fn sphere_front_hit_and_normal() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0);
        let hit = sphere.intersect(&down_z(Vec3::ZERO)).unwrap();
        assert!((hit.distance - 8.0).abs() < 1e-4);
        assert!((hit.normal.unwrap() - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn sphere_from_inside_hits_far_side() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let hit = sphere.intersect(&down_z(Vec3::ZERO)).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-4);
        // Inner surface faces back at the viewer.
        assert!((hit.normal.unwrap() - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn sphere_behind_is_missed() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        assert!(sphere.intersect(&down_z(Vec3::ZERO)).is_none());
    }

    #[test]
    fn box_entry_face_normal() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE);
        let hit = aabb.intersect(&down_z(Vec3::ZERO)).unwrap();
        assert!((hit.distance - 4.5).abs() < 1e-4);
        assert_eq!(hit.normal, Some(Vec3::Z));

        let miss = aabb.intersect(&down_z(Vec3::new(2.0, 0.0, 0.0)));
        assert!(miss.is_none());
    }

    #[test]
    fn box_from_inside_hits_exit_face() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let hit = aabb.intersect(&down_z(Vec3::ZERO)).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-4);
        assert_eq!(hit.normal, Some(Vec3::Z));
    }

    #[test]
    fn directionless_ray_misses_box() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(aabb.slab(&ray).is_none());
        assert!(aabb.intersect(&ray).is_none());
    }

    #[test]
    fn quad_hit_faces_viewer() {
        let quad = TriangleMesh::quad(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 3.0);
        let hit = quad.intersect(&down_z(Vec3::ZERO)).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-4);
        assert!((hit.normal.unwrap() - Vec3::Z).length() < 1e-4);

        let outside = quad.intersect(&down_z(Vec3::new(3.5, 0.0, 0.0)));
        assert!(outside.is_none());

        // Wound away from the camera: the back face still faces +Z.
        let back =
            TriangleMesh::quad(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z, 3.0);
        let hit = back.intersect(&down_z(Vec3::ZERO)).unwrap();
        assert!((hit.normal.unwrap() - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn mesh_reports_nearest_triangle() {
        let positions = vec![
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
            Vec3::new(-1.0, -1.0, -6.0),
            Vec3::new(1.0, -1.0, -6.0),
            Vec3::new(0.0, 1.0, -6.0),
        ];
        let mesh =
            TriangleMesh::new(positions, vec![[3, 4, 5], [0, 1, 2]]).unwrap();
        let hit = mesh.intersect(&down_z(Vec3::ZERO)).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn mesh_rejects_bad_indices() {
        let result = TriangleMesh::new(vec![Vec3::ZERO], vec![[0, 0, 1]]);
        assert!(matches!(result, Err(CursorError::InvalidGeometry(_))));
    }

    #[test]
    fn empty_mesh_never_hits() {
        let mesh = TriangleMesh::new(Vec::new(), Vec::new()).unwrap();
        assert!(mesh.bounds().is_none());
        assert!(mesh.intersect(&down_z(Vec3::ZERO)).is_none());
    }
}
