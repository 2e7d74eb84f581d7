//! Ray-marched scalar volume used as a volume-rendering pick proxy.

use glam::{UVec3, Vec3};

use super::primitives::Aabb;
use super::{facing_normal, Intersection, Pickable, Ray, MIN_HIT_DISTANCE};
use crate::error::CursorError;

/// Bisection steps used to refine the threshold crossing.
const REFINE_STEPS: u32 = 8;

/// Upper bound on march samples for a single ray.
const MAX_MARCH_STEPS: u32 = 1 << 16;

/// A scalar grid filling an axis-aligned box.
///
/// The ray is marched at half the smallest voxel spacing; the first sample
/// at or above `threshold` is the hit. Samples are trilinearly
/// interpolated between voxel centers.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeProxy {
    bounds: Aabb,
    dims: UVec3,
    samples: Vec<f32>,
    threshold: f32,
}

impl VolumeProxy {
    /// Create a volume proxy. `samples` is x-fastest, then y, then z.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::InvalidGeometry`] when a dimension is zero,
    /// the box is empty, or the sample count does not match `dims`.
    pub fn new(
        bounds: Aabb,
        dims: UVec3,
        samples: Vec<f32>,
        threshold: f32,
    ) -> Result<Self, CursorError> {
        if dims.min_element() == 0 {
            return Err(CursorError::InvalidGeometry(
                "volume dimensions must be non-zero".into(),
            ));
        }
        if bounds.size().min_element() <= 0.0 {
            return Err(CursorError::InvalidGeometry(
                "volume bounds must have positive extent".into(),
            ));
        }
        let expected = dims.x as usize * dims.y as usize * dims.z as usize;
        if samples.len() != expected {
            return Err(CursorError::InvalidGeometry(format!(
                "volume expects {expected} samples, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            bounds,
            dims,
            samples,
            threshold,
        })
    }

    /// Build a volume by evaluating `f` at every voxel center.
    ///
    /// # Errors
    ///
    /// Same conditions as [`VolumeProxy::new`].
    pub fn from_fn(
        bounds: Aabb,
        dims: UVec3,
        threshold: f32,
        f: impl Fn(Vec3) -> f32,
    ) -> Result<Self, CursorError> {
        let spacing = bounds.size() / dims.as_vec3();
        let mut samples = Vec::with_capacity(
            dims.x as usize * dims.y as usize * dims.z as usize,
        );
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let center = bounds.min
                        + (UVec3::new(x, y, z).as_vec3() + 0.5) * spacing;
                    samples.push(f(center));
                }
            }
        }
        Self::new(bounds, dims, samples, threshold)
    }

    /// Opacity threshold at which the volume counts as solid.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Volume bounds.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn spacing(&self) -> Vec3 {
        self.bounds.size() / self.dims.as_vec3()
    }

    fn voxel(&self, x: u32, y: u32, z: u32) -> f32 {
        let idx = (z as usize * self.dims.y as usize + y as usize)
            * self.dims.x as usize
            + x as usize;
        self.samples[idx]
    }

    /// Trilinear sample at a world position (clamped to the grid).
    fn sample(&self, p: Vec3) -> f32 {
        let max_index = (self.dims - UVec3::ONE).as_vec3();
        let g = ((p - self.bounds.min) / self.spacing() - 0.5)
            .clamp(Vec3::ZERO, max_index);
        let lo = g.floor().as_uvec3();
        let hi = (lo + UVec3::ONE).min(self.dims - UVec3::ONE);
        let f = g - lo.as_vec3();

        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        let row = |y: u32, z: u32| {
            lerp(self.voxel(lo.x, y, z), self.voxel(hi.x, y, z), f.x)
        };
        let near = lerp(row(lo.y, lo.z), row(hi.y, lo.z), f.y);
        let far = lerp(row(lo.y, hi.z), row(hi.y, hi.z), f.y);
        lerp(near, far, f.z)
    }

    /// Normal from the negative central-difference gradient, turned to
    /// face against `ray`.
    fn normal_at(&self, ray: &Ray, p: Vec3) -> Option<Vec3> {
        let h = self.spacing();
        let gradient = Vec3::new(
            self.sample(p + Vec3::X * h.x) - self.sample(p - Vec3::X * h.x),
            self.sample(p + Vec3::Y * h.y) - self.sample(p - Vec3::Y * h.y),
            self.sample(p + Vec3::Z * h.z) - self.sample(p - Vec3::Z * h.z),
        ) / (2.0 * h);
        facing_normal(-gradient, ray)
    }

    /// Narrow a threshold crossing known to lie in `(lo, hi]`.
    fn refine(&self, ray: &Ray, mut lo: f32, mut hi: f32) -> f32 {
        for _ in 0..REFINE_STEPS {
            let mid = 0.5 * (lo + hi);
            if self.sample(ray.at(mid)) >= self.threshold {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        hi
    }
}

impl Pickable for VolumeProxy {
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let slab = self.bounds.slab(ray)?;
        let start = slab.t_enter.max(MIN_HIT_DISTANCE);
        let step = 0.5 * self.spacing().min_element();
        // Index-based stepping: far from the origin `t + step` can round
        // back to `t`.
        let steps = ((slab.t_exit - start) / step)
            .ceil()
            .clamp(0.0, MAX_MARCH_STEPS as f32) as u32;

        let mut prev = start;
        for i in 0..=steps {
            let t = (start + i as f32 * step).min(slab.t_exit);
            if self.sample(ray.at(t)) >= self.threshold {
                let distance = if t > start {
                    self.refine(ray, prev, t)
                } else {
                    t
                };
                return Some(Intersection {
                    distance,
                    normal: self.normal_at(ray, ray.at(distance)),
                });
            }
            prev = t;
        }
        None
    }
}
