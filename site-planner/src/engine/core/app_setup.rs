use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::CLEAR_COLOUR;

use crate::engine::assets::site_config::SiteConfig;
use crate::engine::camera::plan_camera::spawn_plan_camera;
use crate::engine::core::app_state::{AppState, SiteSystems, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{
    SiteConfigLoader, load_site_config_system, site_config_applied, start_loading,
};
use crate::engine::scene::reconfigure::SiteScenePlugin;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::drag::DragToolPlugin;
use crate::tools::setback::SetbackToolPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::tools::site_panel::SitePanelPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .insert_resource(ClearColor(CLEAR_COLOUR))
        // Registers SiteConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SiteConfig>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(SiteScenePlugin)
        .add_plugins(DragToolPlugin)
        .add_plugins(SetbackToolPlugin);

    // Plugin for the site panel UI
    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(SitePanelPlugin);

    app.init_resource::<SiteConfigLoader>().configure_sets(
        Update,
        (
            SiteSystems::Reconfigure,
            SiteSystems::Input,
            SiteSystems::Measure,
        )
            .chain(),
    );

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                // The placement policy must land before the first layout is built.
                load_site_config_system.before(SiteSystems::Reconfigure),
                transition_to_running.run_if(site_config_applied),
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        );

    app
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_plan_camera(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
