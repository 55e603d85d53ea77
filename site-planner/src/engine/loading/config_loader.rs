use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::site_defaults::SITE_CONFIG_PATH;

use crate::engine::assets::site_config::SiteConfig;
use crate::engine::scene::reconfigure::{ReconfigureSiteEvent, ReconfigureSource};

#[derive(Resource, Default)]
pub struct SiteConfigLoader {
    handle: Option<Handle<SiteConfig>>,
    applied: bool,
}

// Start the loading process
pub fn start_loading(mut loader: ResMut<SiteConfigLoader>, asset_server: Res<AssetServer>) {
    info!("Loading site configuration from: {}", SITE_CONFIG_PATH);
    loader.handle = Some(asset_server.load(SITE_CONFIG_PATH));
}

/// Once the config asset has loaded (or failed to), install its placement
/// policy and request the initial layout.
pub fn load_site_config_system(
    mut loader: ResMut<SiteConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<SiteConfig>>,
    mut commands: Commands,
    mut reconfigure: EventWriter<ReconfigureSiteEvent>,
) {
    if loader.applied {
        return;
    }
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    let config = if let Some(config) = configs.get(handle) {
        info!("✓ Site configuration loaded");
        config.clone()
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        error!(
            "Failed to load {}: {}; using built-in site defaults",
            SITE_CONFIG_PATH, err
        );
        SiteConfig::default()
    } else {
        return;
    };

    let config = match config.inputs().parse() {
        Ok(_) => config,
        Err(err) => {
            error!("Invalid site configuration ({}); using built-in site defaults", err);
            SiteConfig::default()
        }
    };

    commands.insert_resource(config.placement_policy());
    reconfigure.write(ReconfigureSiteEvent {
        inputs: config.inputs(),
        source: ReconfigureSource::Startup,
    });
    loader.applied = true;
}

pub fn site_config_applied(loader: Res<SiteConfigLoader>) -> bool {
    loader.applied
}
