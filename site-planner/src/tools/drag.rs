//! Pointer drag of house and garage.
//!
//! The pointer ray is intersected with the whole plot plane (z = 0), not only
//! the plot rectangle, so motion outside the plot keeps driving the drag and
//! the clamp pins the structure against the nearest plot edge.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::PLOT_Z;

use super::ray::{ray_hits_footprint, ray_plane_hit};
use crate::engine::camera::plan_camera::{PlanCamera, cursor_ray};
use crate::engine::core::app_state::{AppState, SiteSystems};
use crate::engine::scene::site_model::{SiteLayout, StructureKind};
use crate::rpc::web_rpc::WebRpcInterface;

/// Which structure is grabbed and whether a drag is in progress.
///
/// Idle until a press hits a structure, dragging until the button is
/// released anywhere. Pointer motion while idle does nothing.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    selected: Option<StructureKind>,
    active: bool,
    /// Layout generation the selection was made against.
    generation: u32,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.active
    }

    /// Most recently grabbed structure. Kept after release.
    pub fn selected(&self) -> Option<StructureKind> {
        self.selected
    }

    /// Pick the structure under the ray, house before garage, and start
    /// dragging it. A miss leaves the state untouched.
    pub fn hit_test(&mut self, layout: &SiteLayout, ray: Ray3d) -> Option<StructureKind> {
        let hit = StructureKind::ALL.into_iter().find(|kind| {
            ray_hits_footprint(ray, layout.footprint(*kind), kind.z_layer()).is_some()
        })?;

        self.selected = Some(hit);
        self.active = true;
        self.generation = layout.generation;
        Some(hit)
    }

    /// Move the grabbed structure to where the ray meets the plot plane,
    /// clamped inside the plot. Returns the new center, or `None` when not
    /// dragging.
    pub fn drag_to(&mut self, layout: &mut SiteLayout, ray: Ray3d) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let Some(kind) = self.selected else {
            self.active = false;
            return None;
        };

        if self.generation != layout.generation {
            warn!(
                "Dropping drag of {}: the layout was rebuilt since it was grabbed",
                kind.as_str()
            );
            self.release();
            return None;
        }

        let (_, proposed) = ray_plane_hit(ray, PLOT_Z)?;
        Some(layout.move_structure(kind, proposed))
    }

    /// End any drag. Returns whether one was in progress.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

fn pointer_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&GlobalTransform, &Camera), With<PlanCamera>>,
) -> Option<Ray3d> {
    let window = windows.single().ok()?;
    let (camera_transform, camera) = cameras.single().ok()?;
    cursor_ray(window, camera, camera_transform)
}

pub fn handle_drag_press(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<PlanCamera>>,
    ui_interactions: Query<&Interaction>,
    layout: Res<SiteLayout>,
    mut drag: ResMut<DragState>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    // Presses on panel widgets belong to the UI.
    if ui_interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None)
    {
        return;
    }

    let Some(ray) = pointer_ray(&windows, &cameras) else {
        return;
    };

    if let Some(kind) = drag.hit_test(&layout, ray) {
        info!("Dragging {}", kind.as_str());
    }
}

pub fn handle_drag_motion(
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<PlanCamera>>,
    mut layout: ResMut<SiteLayout>,
    mut drag: ResMut<DragState>,
) {
    let moved = cursor_moved.read().count() > 0;
    if !moved || !drag.is_dragging() {
        return;
    }

    let Some(ray) = pointer_ray(&windows, &cameras) else {
        return;
    };
    drag.drag_to(&mut layout, ray);
}

pub fn handle_drag_release(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    layout: Res<SiteLayout>,
    mut drag: ResMut<DragState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let released =
        mouse.just_released(MouseButton::Left) || keyboard.just_pressed(KeyCode::Escape);
    if !released || !drag.release() {
        return;
    }
    let Some(kind) = drag.selected() else {
        return;
    };

    let center = layout.footprint(kind).center / layout.scale();
    info!(
        "Released {} at ({:.2}, {:.2})",
        kind.as_str(),
        center.x,
        center.y
    );
    rpc_interface.send_notification(
        "structure_released",
        serde_json::json!({
            "structure": kind.as_str(),
            "center": [center.x, center.y],
        }),
    );
}

pub struct DragToolPlugin;

impl Plugin for DragToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>().add_systems(
            Update,
            (handle_drag_press, handle_drag_motion, handle_drag_release)
                .chain()
                .in_set(SiteSystems::Input)
                .run_if(in_state(AppState::Running))
                .run_if(resource_exists::<SiteLayout>),
        );
    }
}
