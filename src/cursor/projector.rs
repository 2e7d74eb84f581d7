//! Pointer-to-world projection with focal-plane fallback.

use glam::Vec2;

use super::state::{
    marker_scale, CursorProjection, Orientation, Placement, PlacementSource,
};
use crate::error::CursorError;
use crate::options::CursorOptions;
use crate::view::ViewContext;

/// Maps a pointer position in a render view to a cursor placement.
///
/// Stateless: every call depends only on its arguments, and nothing is
/// written back to the view.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorProjector;

impl CursorProjector {
    /// Create a projector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Project `pointer` (pixels, origin top-left) into `view`.
    ///
    /// - Disabled cursors return [`CursorProjection::Hidden`] without
    ///   querying the view.
    /// - Pointers outside the viewport return `Hidden`.
    /// - A geometry hit places the cursor on the nearest surface, oriented
    ///   along its normal.
    /// - Otherwise the cursor lands where the pointer ray crosses the focal
    ///   plane, oriented by `config.fallback_orientation`.
    ///
    /// The world scale is `config.size` percent of the view height at the
    /// placement depth, so the on-screen size is zoom independent.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ViewUnavailable`] when the view cannot
    /// produce a camera transform. "No hit" is never an error.
    pub fn project<V>(
        &self,
        pointer: Vec2,
        view: &V,
        config: &CursorOptions,
    ) -> Result<CursorProjection, CursorError>
    where
        V: ViewContext + ?Sized,
    {
        if !config.enabled {
            return Ok(CursorProjection::Hidden);
        }

        let xf = view.camera_transform()?;
        let viewport = xf.viewport();
        if !viewport.contains(pointer) {
            return Ok(CursorProjection::Hidden);
        }

        let ray = xf.screen_to_ray(pointer);
        let (position, normal, source) = match view.pick(&ray) {
            Some(hit) => {
                (hit.point, hit.normal, PlacementSource::Surface(hit.node))
            }
            None => {
                (xf.focal_plane_point(&ray)?, None, PlacementSource::FocalPlane)
            }
        };

        let orientation = normal.map_or_else(
            || config.fallback_orientation.resolve(xf.forward()),
            Orientation::Surface,
        );
        let view_height =
            view.view_scale_at(position)? * viewport.height as f32;

        Ok(CursorProjection::Placed(Placement {
            position,
            orientation,
            scale: marker_scale(config.size, view_height),
            view_height,
            source,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::camera::{Camera, CameraTransform, Viewport};
    use crate::options::FallbackOrientation;
    use crate::picking::{Geometry, Hit, Ray, Scene, Sphere, TriangleMesh};
    use crate::view::RenderView;

    const VIEWPORT: Viewport = Viewport::new(800, 600);

    fn camera() -> Camera {
        Camera::perspective(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), 30.0)
    }

    fn placed(projection: CursorProjection) -> Placement {
        *projection.placement().expect("expected a placement")
    }

    fn assert_vec_near(a: Vec3, b: Vec3, tol: f32) {
        assert!((a - b).length() < tol, "{a:?} != {b:?}");
    }

    #[test]
    fn empty_scene_falls_back_to_focal_plane() {
        let scene = Scene::new();
        let cam = camera();
        let view = RenderView::new(&cam, VIEWPORT, &scene);
        let p = placed(
            CursorProjector::new()
                .project(VIEWPORT.center(), &view, &CursorOptions::default())
                .unwrap(),
        );
        assert_vec_near(p.position, Vec3::new(0.0, 0.0, -10.0), 1e-3);
        assert_eq!(p.source, PlacementSource::FocalPlane);
        assert_eq!(p.orientation.normal(), None);
        assert_vec_near(p.orientation.direction(), Vec3::Z, 1e-5);
    }

    #[test]
    fn surface_hit_uses_hit_point_and_normal() {
        let mut scene = Scene::new();
        let id = scene.add(
            "plane",
            Geometry::Mesh(TriangleMesh::quad(
                Vec3::NEG_Z * 5.0,
                Vec3::Z,
                50.0,
            )),
        );
        let cam = camera();
        let view = RenderView::new(&cam, VIEWPORT, &scene);
        let p = placed(
            CursorProjector::new()
                .project(VIEWPORT.center(), &view, &CursorOptions::default())
                .unwrap(),
        );
        assert_vec_near(p.position, Vec3::new(0.0, 0.0, -5.0), 1e-3);
        assert_eq!(p.source, PlacementSource::Surface(id));
        assert_vec_near(p.orientation.normal().unwrap(), Vec3::Z, 1e-5);
    }

    #[test]
    fn nearest_of_overlapping_geometry_wins() {
        let mut scene = Scene::new();
        let _plane = scene.add(
            "plane",
            Geometry::Mesh(TriangleMesh::quad(
                Vec3::NEG_Z * 8.0,
                Vec3::Z,
                50.0,
            )),
        );
        let ball = scene.add(
            "ball",
            Geometry::Sphere(Sphere::new(Vec3::NEG_Z * 4.0, 1.0)),
        );
        let cam = camera();
        let view = RenderView::new(&cam, VIEWPORT, &scene);
        let p = placed(
            CursorProjector::new()
                .project(VIEWPORT.center(), &view, &CursorOptions::default())
                .unwrap(),
        );
        assert_eq!(p.source, PlacementSource::Surface(ball));
        assert_vec_near(p.position, Vec3::NEG_Z * 3.0, 1e-3);
    }

    /// View wrapper that counts camera queries.
    struct CountingView<'a> {
        inner: RenderView<'a>,
        queries: Cell<u32>,
    }

    impl ViewContext for CountingView<'_> {
        fn camera_transform(&self) -> Result<CameraTransform, CursorError> {
            self.queries.set(self.queries.get() + 1);
            self.inner.camera_transform()
        }

        fn pick(&self, ray: &Ray) -> Option<Hit> {
            self.inner.pick(ray)
        }
    }

    #[test]
    fn disabled_is_hidden_and_does_no_work() {
        let mut scene = Scene::new();
        let _ = scene.add(
            "plane",
            Geometry::Mesh(TriangleMesh::quad(
                Vec3::NEG_Z * 5.0,
                Vec3::Z,
                50.0,
            )),
        );
        let cam = camera();
        let view = CountingView {
            inner: RenderView::new(&cam, VIEWPORT, &scene),
            queries: Cell::new(0),
        };
        let config = CursorOptions {
            enabled: false,
            ..CursorOptions::default()
        };
        let projector = CursorProjector::new();
        for pointer in [VIEWPORT.center(), Vec2::ZERO, Vec2::splat(-50.0)] {
            let result = projector.project(pointer, &view, &config).unwrap();
            assert_eq!(result, CursorProjection::Hidden);
        }
        assert_eq!(view.queries.get(), 0);
    }

    #[test]
    fn out_of_bounds_pointer_is_hidden() {
        let scene = Scene::new();
        let cam = camera();
        let view = RenderView::new(&cam, VIEWPORT, &scene);
        let projector = CursorProjector::new();
        let config = CursorOptions::default();
        for pointer in [
            Vec2::new(-1.0, 10.0),
            Vec2::new(10.0, 601.0),
            Vec2::new(f32::NAN, 10.0),
        ] {
            let result = projector.project(pointer, &view, &config).unwrap();
            assert!(!result.is_visible());
        }
    }

    #[test]
    fn unavailable_view_is_an_error() {
        let scene = Scene::new();
        let view = RenderView::uninitialized(VIEWPORT, &scene);
        let result = CursorProjector::new().project(
            VIEWPORT.center(),
            &view,
            &CursorOptions::default(),
        );
        assert!(matches!(result, Err(CursorError::ViewUnavailable(_))));
    }

    #[test]
    fn world_axis_fallback_orientation() {
        let scene = Scene::new();
        let cam = camera();
        let view = RenderView::new(&cam, VIEWPORT, &scene);
        let config = CursorOptions {
            fallback_orientation: FallbackOrientation::WorldAxis {
                axis: [0.0, 2.0, 0.0],
            },
            ..CursorOptions::default()
        };
        let p = placed(
            CursorProjector::new()
                .project(VIEWPORT.center(), &view, &config)
                .unwrap(),
        );
        assert_eq!(p.orientation, Orientation::Fixed(Vec3::Y));
    }

    #[test]
    fn apparent_size_is_zoom_invariant() {
        let mut scene = Scene::new();
        let _ = scene.add(
            "plane",
            Geometry::Mesh(TriangleMesh::quad(
                Vec3::ZERO,
                Vec3::Z,
                1000.0,
            )),
        );
        let config = CursorOptions::default();
        let projector = CursorProjector::new();

        let mut on_screen = Vec::new();
        let mut world = Vec::new();
        for distance in [10.0, 40.0] {
            let cam =
                Camera::perspective(Vec3::Z * distance, Vec3::ZERO, 30.0);
            let view = RenderView::new(&cam, VIEWPORT, &scene);
            let p = placed(
                projector.project(VIEWPORT.center(), &view, &config).unwrap(),
            );
            let px = view.view_scale_at(p.position).unwrap();
            world.push(p.scale);
            on_screen.push(p.scale / px);
        }
        assert!((world[1] / world[0] - 4.0).abs() < 1e-3);
        assert!((on_screen[0] - on_screen[1]).abs() < 1e-3);
        // 3% of a 600 px tall view.
        assert!((on_screen[0] - 18.0).abs() < 1e-2);
    }

    #[test]
    fn random_misses_land_on_focal_plane() {
        let scene = Scene::new();
        let cam = Camera::perspective(
            Vec3::new(3.0, -2.0, 7.0),
            Vec3::new(-1.0, 4.0, -12.0),
            40.0,
        );
        let view = RenderView::new(&cam, VIEWPORT, &scene);
        let xf = view.camera_transform().unwrap();
        let projector = CursorProjector::new();
        let config = CursorOptions::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let pointer = Vec2::new(
                rng.random_range(0.0..800.0),
                rng.random_range(0.0..600.0),
            );
            let p = placed(projector.project(pointer, &view, &config).unwrap());
            let depth = (p.position - xf.eye()).dot(xf.forward());
            assert!((depth - xf.focal_distance()).abs() < 1e-2);
            assert_eq!(p.source, PlacementSource::FocalPlane);
        }
    }

    #[test]
    fn random_hits_land_on_surface() {
        let mut scene = Scene::new();
        let _ = scene.add(
            "wall",
            Geometry::Mesh(TriangleMesh::quad(
                Vec3::NEG_Z * 6.0,
                Vec3::Z,
                500.0,
            )),
        );
        let cam = camera();
        let view = RenderView::new(&cam, VIEWPORT, &scene);
        let projector = CursorProjector::new();
        let config = CursorOptions::default();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let pointer = Vec2::new(
                rng.random_range(0.0..800.0),
                rng.random_range(0.0..600.0),
            );
            let p = placed(projector.project(pointer, &view, &config).unwrap());
            assert!((p.position.z + 6.0).abs() < 1e-3);
            assert_vec_near(p.orientation.direction(), Vec3::Z, 1e-5);
        }
    }

    #[test]
    fn parallel_view_falls_back_to_slice_plane() {
        let scene = Scene::new();
        let cam =
            Camera::parallel(Vec3::Z * 100.0, Vec3::new(0.0, 0.0, 20.0), 50.0);
        let view = RenderView::new(&cam, VIEWPORT, &scene);
        let projector = CursorProjector::new();
        let config = CursorOptions::default();

        let at = |x: f32, y: f32| {
            placed(projector.project(Vec2::new(x, y), &view, &config).unwrap())
        };
        let a = at(100.0, 100.0);
        let b = at(700.0, 500.0);
        assert!((a.position.z - 20.0).abs() < 1e-3);
        assert!((b.position.z - 20.0).abs() < 1e-3);
        assert!((a.scale - b.scale).abs() < 1e-6);
        // 3% of the 100-unit tall parallel view.
        assert!((a.scale - 3.0).abs() < 1e-4);
    }
}
