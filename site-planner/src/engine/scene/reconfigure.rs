use bevy::prelude::*;

use super::site_entities::{SiteEntity, spawn_site, sync_structure_transforms};
use super::site_inputs::SiteInputs;
use super::site_model::{PlacementPolicy, SiteLayout};
use crate::engine::core::app_state::SiteSystems;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::drag::DragState;

/// Where a reconfiguration request came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconfigureSource {
    Startup,
    Panel,
    Rpc,
}

/// Request to rebuild the site from a fresh set of inputs.
#[derive(Event, Debug, Clone)]
pub struct ReconfigureSiteEvent {
    pub inputs: SiteInputs,
    pub source: ReconfigureSource,
}

/// Outcome of the most recent reconfiguration, shown to the user.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct SiteStatus {
    pub message: String,
    pub is_error: bool,
}

impl SiteStatus {
    fn accepted(layout: &SiteLayout) -> Self {
        let dims = &layout.dimensions;
        Self {
            message: format!(
                "Plot {} x {}, scale {} px/unit",
                dims.plot.width, dims.plot.height, dims.scale
            ),
            is_error: false,
        }
    }

    fn rejected(message: String) -> Self {
        Self {
            message,
            is_error: true,
        }
    }
}

/// Validate requested inputs and, if valid, replace the layout and all site
/// entities. Invalid input leaves the current scene untouched. Any active
/// drag is released since the structure it holds is about to be despawned.
pub fn apply_site_reconfiguration(
    mut commands: Commands,
    mut events: EventReader<ReconfigureSiteEvent>,
    policy: Res<PlacementPolicy>,
    current: Option<Res<SiteLayout>>,
    existing: Query<Entity, With<SiteEntity>>,
    mut drag: ResMut<DragState>,
    mut status: ResMut<SiteStatus>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let mut accepted = None;

    for event in events.read() {
        let result = event
            .inputs
            .parse()
            .and_then(|dimensions| SiteLayout::from_dimensions(dimensions, &policy));

        match result {
            Ok(layout) => {
                *status = SiteStatus::accepted(&layout);
                accepted = Some((layout, event.source));
            }
            Err(err) => {
                error!("Site update from {:?} rejected: {}", event.source, err);
                *status = SiteStatus::rejected(err.to_string());
                rpc_interface.send_notification(
                    "site_update_rejected",
                    serde_json::json!({
                        "message": err.to_string(),
                        "field": err.field().map(|field| field.label()),
                    }),
                );
            }
        }
    }

    let Some((mut layout, source)) = accepted else {
        return;
    };

    layout.generation = current.map_or(0, |current| current.generation.wrapping_add(1));

    if drag.release() {
        info!("Active drag released by site reconfiguration");
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }
    spawn_site(&mut commands, &layout);

    info!(
        "Site rebuilt via {:?}: plot {}x{} px, generation {}",
        source, layout.plot_size.x, layout.plot_size.y, layout.generation
    );
    rpc_interface.send_notification(
        "site_updated",
        serde_json::json!({
            "generation": layout.generation,
            "plot_size": [layout.plot_size.x, layout.plot_size.y],
            "scale": layout.scale(),
        }),
    );

    commands.insert_resource(layout);
}

pub struct SiteScenePlugin;

impl Plugin for SiteScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementPolicy>()
            .init_resource::<SiteStatus>()
            .init_resource::<DragState>()
            .add_event::<ReconfigureSiteEvent>()
            .add_systems(
                Update,
                (
                    apply_site_reconfiguration.in_set(SiteSystems::Reconfigure),
                    sync_structure_transforms
                        .in_set(SiteSystems::Measure)
                        .run_if(resource_exists::<SiteLayout>),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::site_inputs::SiteField;
    use crate::engine::scene::site_model::{Extent, StructureKind};

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ReconfigureSiteEvent>()
            .init_resource::<PlacementPolicy>()
            .init_resource::<DragState>()
            .init_resource::<SiteStatus>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, apply_site_reconfiguration);
        app
    }

    fn inputs() -> SiteInputs {
        SiteInputs::from_values(
            Extent::new(40.0, 30.0),
            Extent::new(12.0, 9.0),
            Extent::new(6.0, 6.0),
            15.0,
        )
    }

    fn reconfigure(app: &mut App, inputs: SiteInputs) {
        app.world_mut().send_event(ReconfigureSiteEvent {
            inputs,
            source: ReconfigureSource::Panel,
        });
        app.update();
    }

    fn site_entity_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<SiteEntity>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_first_reconfiguration_creates_layout_and_entities() {
        let mut app = test_app();
        reconfigure(&mut app, inputs());

        let layout = app.world().resource::<SiteLayout>();
        assert_eq!(layout.generation, 0);
        assert_eq!(layout.plot_size, Vec2::new(600.0, 450.0));
        assert_eq!(site_entity_count(&mut app), 3);
        assert!(!app.world().resource::<SiteStatus>().is_error);
    }

    #[test]
    fn test_reconfiguration_is_idempotent() {
        let mut app = test_app();
        reconfigure(&mut app, inputs());
        let first = app.world().resource::<SiteLayout>().clone();

        reconfigure(&mut app, inputs());
        let second = app.world().resource::<SiteLayout>().clone();

        assert_eq!(second.generation, first.generation + 1);
        assert_eq!(first.plot_size, second.plot_size);
        assert_eq!(first.house, second.house);
        assert_eq!(first.garage, second.garage);
        assert_eq!(site_entity_count(&mut app), 3);
    }

    #[test]
    fn test_reconfiguration_resets_dragged_positions() {
        let mut app = test_app();
        reconfigure(&mut app, inputs());
        let original = app.world().resource::<SiteLayout>().house;

        app.world_mut()
            .resource_mut::<SiteLayout>()
            .move_structure(StructureKind::House, Vec2::ZERO);
        reconfigure(&mut app, inputs());

        assert_eq!(app.world().resource::<SiteLayout>().house, original);
    }

    #[test]
    fn test_invalid_inputs_keep_current_scene() {
        let mut app = test_app();
        reconfigure(&mut app, inputs());
        let before = app.world().resource::<SiteLayout>().clone();

        let mut bad = inputs();
        bad.set(SiteField::Scale, "0");
        reconfigure(&mut app, bad);

        assert_eq!(*app.world().resource::<SiteLayout>(), before);
        assert_eq!(site_entity_count(&mut app), 3);
        let status = app.world().resource::<SiteStatus>();
        assert!(status.is_error);
        assert!(status.message.starts_with("Scale"));

        let rpc = app.world().resource::<WebRpcInterface>();
        let last = rpc.pending_notifications().last().expect("notification");
        assert_eq!(last.method, "site_update_rejected");
        assert_eq!(last.params["field"], "Scale (px/unit)");
    }

    #[test]
    fn test_invalid_first_inputs_create_nothing() {
        let mut app = test_app();
        let mut bad = inputs();
        bad.set(SiteField::PlotWidth, "wide");
        reconfigure(&mut app, bad);

        assert!(app.world().get_resource::<SiteLayout>().is_none());
        assert_eq!(site_entity_count(&mut app), 0);
    }

    #[test]
    fn test_reconfiguration_mid_drag_releases_drag() {
        let mut app = test_app();
        reconfigure(&mut app, inputs());

        let layout = app.world().resource::<SiteLayout>().clone();
        let ray = Ray3d::new(layout.house.center.extend(100.0), Dir3::NEG_Z);
        let hit = app.world_mut().resource_mut::<DragState>().hit_test(&layout, ray);
        assert_eq!(hit, Some(StructureKind::House));

        reconfigure(&mut app, inputs());

        let drag = *app.world().resource::<DragState>();
        assert!(!drag.is_dragging());

        let mut layout = app.world().resource::<SiteLayout>().clone();
        let before = layout.house.center;
        let mut drag = drag;
        assert_eq!(drag.drag_to(&mut layout, ray), None);
        assert_eq!(layout.house.center, before);
    }
}
