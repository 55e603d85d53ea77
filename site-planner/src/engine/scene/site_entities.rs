use bevy::prelude::*;
use constants::render_settings::{PLOT_COLOUR, PLOT_Z};

use super::site_model::{SiteLayout, StructureKind};

/// Every entity spawned for the current layout. Despawned as a group on
/// reconfiguration.
#[derive(Component)]
pub struct SiteEntity;

#[derive(Component)]
pub struct PlotRect;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureRect(pub StructureKind);

/// Spawn plot, house and garage sprites for a layout.
pub fn spawn_site(commands: &mut Commands, layout: &SiteLayout) {
    commands.spawn((
        Sprite::from_color(PLOT_COLOUR, layout.plot_size),
        Transform::from_xyz(0.0, 0.0, PLOT_Z),
        PlotRect,
        SiteEntity,
        Name::new("Plot"),
    ));

    for kind in StructureKind::ALL {
        let footprint = layout.footprint(kind);
        commands.spawn((
            Sprite::from_color(kind.colour(), footprint.size),
            Transform::from_translation(footprint.center.extend(kind.z_layer())),
            StructureRect(kind),
            SiteEntity,
            Name::new(kind.display_name()),
        ));
    }
}

/// Mirror structure centers from the layout onto their sprites.
pub fn sync_structure_transforms(
    layout: Res<SiteLayout>,
    mut structures: Query<(&StructureRect, &mut Transform)>,
) {
    if !layout.is_changed() {
        return;
    }

    for (StructureRect(kind), mut transform) in &mut structures {
        let center = layout.footprint(*kind).center;
        if transform.translation.truncate() != center {
            transform.translation.x = center.x;
            transform.translation.y = center.y;
        }
    }
}
