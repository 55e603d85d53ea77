use std::collections::HashSet;

use bevy::prelude::*;
use constants::render_settings::{
    LABEL_COLOUR, LABEL_FONT_SIZE, PLOT_Z, SETBACK_DASH_LENGTH, SETBACK_GAP_LENGTH,
    SETBACK_LINE_COLOUR, SETBACK_LINE_WIDTH,
};
use serde::{Deserialize, Serialize};

use crate::engine::camera::plan_camera::PlanCamera;
use crate::engine::core::app_state::SiteSystems;
use crate::engine::scene::site_model::{Footprint, SiteLayout, StructureKind};

/// Side of a structure, facing the plot boundary it is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetbackSide {
    Left,
    Right,
    Bottom,
    Top,
}

impl SetbackSide {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Bottom, Self::Top];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Top => "top",
        }
    }

    /// Unit vector pointing from the structure towards the boundary.
    pub fn outward(&self) -> Vec2 {
        match self {
            Self::Left => Vec2::NEG_X,
            Self::Right => Vec2::X,
            Self::Bottom => Vec2::NEG_Y,
            Self::Top => Vec2::Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetbackMeasurement {
    pub structure: StructureKind,
    pub side: SetbackSide,
    /// Midpoint of the structure edge facing `side`, in pixels.
    pub edge_point: Vec2,
    /// Plot boundary point straight out from the edge, in pixels.
    pub boundary_point: Vec2,
    /// Real-world distance between the two points.
    pub distance: f32,
}

impl SetbackMeasurement {
    pub fn midpoint(&self) -> Vec2 {
        self.edge_point.lerp(self.boundary_point, 0.5)
    }

    pub fn label_text(&self) -> String {
        format_distance(self.distance)
    }
}

pub fn edge_point(footprint: &Footprint, side: SetbackSide) -> Vec2 {
    footprint.center + side.outward() * footprint.half_size()
}

/// Plot boundary point facing `side`, aligned with `center` on the other axis.
pub fn boundary_point(plot_size: Vec2, center: Vec2, side: SetbackSide) -> Vec2 {
    let half = plot_size * 0.5;
    match side {
        SetbackSide::Left => Vec2::new(-half.x, center.y),
        SetbackSide::Right => Vec2::new(half.x, center.y),
        SetbackSide::Bottom => Vec2::new(center.x, -half.y),
        SetbackSide::Top => Vec2::new(center.x, half.y),
    }
}

pub fn measure_setback(
    layout: &SiteLayout,
    structure: StructureKind,
    side: SetbackSide,
) -> SetbackMeasurement {
    let footprint = layout.footprint(structure);
    let edge_point = edge_point(footprint, side);
    let boundary_point = boundary_point(layout.plot_size, footprint.center, side);

    SetbackMeasurement {
        structure,
        side,
        edge_point,
        boundary_point,
        distance: layout.to_real(edge_point.distance(boundary_point)),
    }
}

/// All eight measurements, house first, sides in `SetbackSide::ALL` order.
pub fn measure_all(layout: &SiteLayout) -> Vec<SetbackMeasurement> {
    StructureKind::ALL
        .into_iter()
        .flat_map(|structure| {
            SetbackSide::ALL
                .into_iter()
                .map(move |side| measure_setback(layout, structure, side))
        })
        .collect()
}

pub fn format_distance(distance: f32) -> String {
    format!("{distance:.2}")
}

/// Screen-space text element showing one setback distance.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetbackLabel {
    pub structure: StructureKind,
    pub side: SetbackSide,
}

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct SetbackGizmos;

pub fn configure_setback_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<SetbackGizmos>();
    config.line.width = SETBACK_LINE_WIDTH;
    config.line.style = GizmoLineStyle::Dashed {
        gap_scale: SETBACK_GAP_LENGTH,
        line_scale: SETBACK_DASH_LENGTH,
    };
}

pub fn spawn_setback_labels(mut commands: Commands) {
    for structure in StructureKind::ALL {
        for side in SetbackSide::ALL {
            commands.spawn((
                Text::new(""),
                TextFont {
                    font_size: LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(LABEL_COLOUR),
                Node {
                    position_type: PositionType::Absolute,
                    ..default()
                },
                SetbackLabel { structure, side },
                Name::new(format!("{}-label-{}", structure.as_str(), side.as_str())),
            ));
        }
    }
}

pub fn draw_setback_lines(mut gizmos: Gizmos<SetbackGizmos>, layout: Res<SiteLayout>) {
    for measurement in measure_all(&layout) {
        gizmos.line_2d(
            measurement.edge_point,
            measurement.boundary_point,
            SETBACK_LINE_COLOUR,
        );
    }
}

/// Setback labels already reported as missing, so each is logged once.
#[derive(Resource, Debug, Default)]
pub struct MissingSetbackLabels(pub HashSet<SetbackLabel>);

/// Write each distance into its label and move the label to `project` of
/// the line midpoint. A label with no projection keeps its old position.
/// Missing labels are reported once and skipped.
pub fn write_setback_labels(
    layout: &SiteLayout,
    labels: &mut Query<(&SetbackLabel, &mut Text, &mut Node)>,
    missing: &mut MissingSetbackLabels,
    project: impl Fn(Vec2) -> Option<Vec2>,
) {
    for measurement in measure_all(layout) {
        let key = SetbackLabel {
            structure: measurement.structure,
            side: measurement.side,
        };
        let Some((_, mut text, mut node)) =
            labels.iter_mut().find(|(label, _, _)| **label == key)
        else {
            if missing.0.insert(key) {
                warn!(
                    "No label for {} {} setback; skipping",
                    key.structure.as_str(),
                    key.side.as_str()
                );
            }
            continue;
        };

        let label_text = measurement.label_text();
        if text.0 != label_text {
            text.0 = label_text;
        }

        let Some(screen) = project(measurement.midpoint()) else {
            continue;
        };
        if node.left != Val::Px(screen.x) || node.top != Val::Px(screen.y) {
            node.left = Val::Px(screen.x);
            node.top = Val::Px(screen.y);
        }
    }
}

pub fn update_setback_labels(
    layout: Res<SiteLayout>,
    cameras: Query<(&Camera, &GlobalTransform), With<PlanCamera>>,
    mut labels: Query<(&SetbackLabel, &mut Text, &mut Node)>,
    mut missing: ResMut<MissingSetbackLabels>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    write_setback_labels(&layout, &mut labels, &mut missing, |point| {
        camera
            .world_to_viewport(camera_transform, point.extend(PLOT_Z))
            .ok()
    });
}

pub struct SetbackToolPlugin;

impl Plugin for SetbackToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<SetbackGizmos>()
            .init_resource::<MissingSetbackLabels>()
            .add_systems(Startup, (configure_setback_gizmos, spawn_setback_labels))
            .add_systems(
                Update,
                (draw_setback_lines, update_setback_labels)
                    .in_set(SiteSystems::Measure)
                    .run_if(resource_exists::<SiteLayout>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::site_model::{Extent, PlacementPolicy, SiteDimensions};

    /// Plot 20 x 15, house 6 x 4, garage 3 x 3, scale 10.
    fn layout() -> SiteLayout {
        let dimensions = SiteDimensions {
            plot: Extent::new(20.0, 15.0),
            house: Extent::new(6.0, 4.0),
            garage: Extent::new(3.0, 3.0),
            scale: 10.0,
        };
        let mut layout = SiteLayout::from_dimensions(dimensions, &PlacementPolicy::default())
            .expect("valid dimensions");
        layout.house.center = Vec2::new(-40.0, 20.0);
        layout.garage.center = Vec2::new(55.0, -40.0);
        layout
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_house_left_distance_matches_hand_computed_value() {
        // ((-40 - 30) - (-100)) / 10 = 3.0
        let m = measure_setback(&layout(), StructureKind::House, SetbackSide::Left);
        assert_eq!(m.edge_point, Vec2::new(-70.0, 20.0));
        assert_eq!(m.boundary_point, Vec2::new(-100.0, 20.0));
        assert_close(m.distance, 3.0);
        assert_eq!(m.label_text(), "3.00");
    }

    #[test]
    fn test_house_all_sides() {
        let layout = layout();
        let distances: Vec<f32> = SetbackSide::ALL
            .iter()
            .map(|side| measure_setback(&layout, StructureKind::House, *side).distance)
            .collect();

        // right: 100 - (-40 + 30) = 110; bottom: (20 - 20) - (-75) = 75; top: 75 - 40 = 35
        assert_close(distances[0], 3.0);
        assert_close(distances[1], 11.0);
        assert_close(distances[2], 7.5);
        assert_close(distances[3], 3.5);
    }

    #[test]
    fn test_opposite_sides_sum_to_plot_minus_structure() {
        let layout = layout();
        for structure in StructureKind::ALL {
            let footprint = layout.footprint(structure);
            let d = |side| measure_setback(&layout, structure, side).distance;
            assert_close(
                d(SetbackSide::Left) + d(SetbackSide::Right),
                layout.to_real(layout.plot_size.x - footprint.size.x),
            );
            assert_close(
                d(SetbackSide::Bottom) + d(SetbackSide::Top),
                layout.to_real(layout.plot_size.y - footprint.size.y),
            );
        }
    }

    #[test]
    fn test_structure_touching_boundary_measures_zero() {
        let mut layout = layout();
        layout.move_structure(StructureKind::Garage, Vec2::new(1000.0, -1000.0));

        let right = measure_setback(&layout, StructureKind::Garage, SetbackSide::Right);
        let bottom = measure_setback(&layout, StructureKind::Garage, SetbackSide::Bottom);
        assert_close(right.distance, 0.0);
        assert_close(bottom.distance, 0.0);
        assert_eq!(right.label_text(), "0.00");
    }

    #[test]
    fn test_boundary_point_aligned_with_center() {
        let plot = Vec2::new(200.0, 150.0);
        let center = Vec2::new(12.0, -7.0);
        assert_eq!(boundary_point(plot, center, SetbackSide::Left), Vec2::new(-100.0, -7.0));
        assert_eq!(boundary_point(plot, center, SetbackSide::Top), Vec2::new(12.0, 75.0));
    }

    #[test]
    fn test_measure_all_covers_every_structure_and_side() {
        let measurements = measure_all(&layout());
        assert_eq!(measurements.len(), 8);

        let keys: HashSet<_> = measurements.iter().map(|m| (m.structure, m.side)).collect();
        assert_eq!(keys.len(), 8);
        assert_eq!(measurements[0].structure, StructureKind::House);
        assert_eq!(measurements[4].structure, StructureKind::Garage);
    }

    #[test]
    fn test_midpoint_lies_between_edge_and_boundary() {
        let m = measure_setback(&layout(), StructureKind::House, SetbackSide::Top);
        assert_eq!(m.midpoint(), Vec2::new(-40.0, 57.5));
    }

    /// Screen position the plan camera gives a world point in a 1280 x 720
    /// window: origin at the centre, y flipped.
    fn plan_view(point: Vec2) -> Option<Vec2> {
        Some(Vec2::new(640.0 + point.x, 360.0 - point.y))
    }

    fn label_app(spawned: &[SetbackLabel]) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(layout())
            .init_resource::<MissingSetbackLabels>()
            .add_systems(
                Update,
                |layout: Res<SiteLayout>,
                 mut labels: Query<(&SetbackLabel, &mut Text, &mut Node)>,
                 mut missing: ResMut<MissingSetbackLabels>| {
                    write_setback_labels(&layout, &mut labels, &mut missing, plan_view);
                },
            );
        for label in spawned {
            app.world_mut()
                .spawn((*label, Text::new(""), Node::default()));
        }
        app
    }

    fn label_state(app: &mut App, key: SetbackLabel) -> (String, Val, Val) {
        let mut query = app.world_mut().query::<(&SetbackLabel, &Text, &Node)>();
        query
            .iter(app.world())
            .find(|(label, _, _)| **label == key)
            .map(|(_, text, node)| (text.0.clone(), node.left, node.top))
            .expect("label spawned")
    }

    #[test]
    fn test_labels_show_distance_at_projected_midpoint() {
        let house_left = SetbackLabel {
            structure: StructureKind::House,
            side: SetbackSide::Left,
        };
        let mut app = label_app(&[house_left]);
        app.update();

        // Midpoint of (-70, 20) and (-100, 20) is (-85, 20).
        let (text, left, top) = label_state(&mut app, house_left);
        assert_eq!(text, "3.00");
        assert_eq!(left, Val::Px(555.0));
        assert_eq!(top, Val::Px(340.0));
    }

    #[test]
    fn test_missing_labels_reported_once_and_others_still_update() {
        let spawned: Vec<SetbackLabel> = StructureKind::ALL
            .into_iter()
            .flat_map(|structure| {
                SetbackSide::ALL
                    .into_iter()
                    .map(move |side| SetbackLabel { structure, side })
            })
            .filter(|label| label.side != SetbackSide::Top)
            .collect();
        let mut app = label_app(&spawned);

        app.update();
        app.update();

        let missing = &app.world().resource::<MissingSetbackLabels>().0;
        assert_eq!(missing.len(), 2);
        assert!(missing.iter().all(|label| label.side == SetbackSide::Top));

        let garage_right = SetbackLabel {
            structure: StructureKind::Garage,
            side: SetbackSide::Right,
        };
        // Garage at (55, -40), half width 15: edge 70, boundary 100.
        let (text, left, top) = label_state(&mut app, garage_right);
        assert_eq!(text, "3.00");
        assert_eq!(left, Val::Px(725.0));
        assert_eq!(top, Val::Px(400.0));
    }

    #[test]
    fn test_format_distance_two_decimals() {
        assert_eq!(format_distance(3.0), "3.00");
        assert_eq!(format_distance(12.345_6), "12.35");
    }
}
