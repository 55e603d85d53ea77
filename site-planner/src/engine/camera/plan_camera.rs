use bevy::prelude::*;
use constants::render_settings::{CAMERA_FAR, CAMERA_NEAR};

#[derive(Component)]
pub struct PlanCamera;

/// Orthographic camera matching the window in logical pixels, looking down
/// -Z at the origin.
pub fn spawn_plan_camera(commands: &mut Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..OrthographicProjection::default_2d()
        }),
        PlanCamera,
        Name::new("PlanCamera"),
    ));
}

/// Ray from the camera through the cursor, if the cursor is in the window.
pub fn cursor_ray(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<Ray3d> {
    let cursor = window.cursor_position()?;
    camera.viewport_to_world(camera_transform, cursor).ok()
}
