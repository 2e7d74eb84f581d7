//! Headless demo: sweeps a pointer across perspective and slice views of
//! a small scene and logs where the virtual cursor lands.

use std::path::PathBuf;
use std::process::ExitCode;

use glam::{UVec3, Vec3};
use virtual_cursor::camera::{Camera, Viewport};
use virtual_cursor::cursor::{MarkerNode, UpdateOutcome, VirtualCursor};
use virtual_cursor::input::InputEvent;
use virtual_cursor::options::Options;
use virtual_cursor::picking::{
    Aabb, Geometry, Scene, Sphere, TriangleMesh, VolumeProxy,
};
use virtual_cursor::view::RenderView;
use virtual_cursor::CursorError;

const VIEWPORT: Viewport = Viewport::new(1280, 720);
const SWEEP_STEPS: u32 = 8;

fn build_scene() -> Result<Scene, CursorError> {
    let mut scene = Scene::new();
    let _ = scene.add(
        "floor",
        Geometry::Mesh(TriangleMesh::quad(
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::Y,
            20.0,
        )),
    );
    let _ = scene.add(
        "ball",
        Geometry::Sphere(Sphere::new(Vec3::new(-3.0, 0.0, 0.0), 1.5)),
    );
    let bounds =
        Aabb::from_center_size(Vec3::new(3.0, 0.0, 0.0), Vec3::splat(3.0));
    let center = bounds.min + bounds.size() * 0.5;
    let blob = VolumeProxy::from_fn(bounds, UVec3::splat(16), 0.5, |p| {
        1.0 - (p - center).length() / 1.5
    })?;
    let _ = scene.add("blob", Geometry::Volume(blob));
    Ok(scene)
}

/// Sweep the pointer across the middle row of a view and log every
/// placement, then leave the view.
fn sweep(
    label: &str,
    cursor: &mut VirtualCursor,
    view: &RenderView<'_>,
    marker: &mut MarkerNode,
) {
    let y = VIEWPORT.center().y;
    for step in 0..=SWEEP_STEPS {
        let x = VIEWPORT.width as f32 * step as f32 / SWEEP_STEPS as f32;
        let event = InputEvent::CursorMoved { x, y };
        let outcome = cursor.handle_event(event, Some(view), marker);
        match outcome {
            UpdateOutcome::Placed(source) => log::info!(
                "[{label}] ({x:.0}, {y:.0}) -> {:?} via {source:?}, \
                 scale {:.3}",
                marker.position,
                marker.scale,
            ),
            other => log::info!("[{label}] ({x:.0}, {y:.0}) -> {other:?}"),
        }
    }
    let _ = cursor.handle_event(InputEvent::CursorLeft, None, marker);
    log::info!("[{label}] pointer left, marker visible: {}", marker.visible);
}

fn run() -> Result<(), CursorError> {
    let options = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Options::load(&path)?,
        None => Options::default(),
    };

    let scene = build_scene()?;
    let mut cursor = VirtualCursor::new(options);
    let mut marker = MarkerNode::default();

    let orbit =
        Camera::perspective(Vec3::new(0.0, 4.0, 16.0), Vec3::ZERO, 30.0);
    let orbit_view = RenderView::new(&orbit, VIEWPORT, &scene);
    sweep("3d", &mut cursor, &orbit_view, &mut marker);

    let slice = Camera::parallel(Vec3::new(0.0, 0.0, 30.0), Vec3::ZERO, 8.0);
    let slice_view = RenderView::new(&slice, VIEWPORT, &scene);
    sweep("slice", &mut cursor, &slice_view, &mut marker);

    let _ = cursor.set_size(10.0, &mut marker);
    sweep("3d large", &mut cursor, &orbit_view, &mut marker);

    cursor.on_scene_close(&mut marker);
    log::info!("Scene closed after {} marker updates", marker.updates);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
