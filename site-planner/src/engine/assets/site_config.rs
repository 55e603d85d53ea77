use bevy::prelude::*;
use constants::placement::{GARAGE_PLACEMENT_OFFSET, HOUSE_PLACEMENT_OFFSET};
use constants::site_defaults::{
    DEFAULT_GARAGE_HEIGHT, DEFAULT_GARAGE_WIDTH, DEFAULT_HOUSE_HEIGHT, DEFAULT_HOUSE_WIDTH,
    DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH, DEFAULT_SCALE,
};
use serde::{Deserialize, Serialize};

use crate::engine::scene::site_inputs::SiteInputs;
use crate::engine::scene::site_model::{Extent, PlacementPolicy};

/// Startup site configuration. Mirrors the JSON file; any missing field
/// falls back to the built-in default.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub plot_width: f32,
    pub plot_height: f32,
    pub house_width: f32,
    pub house_height: f32,
    pub garage_width: f32,
    pub garage_height: f32,
    /// Pixels per real-world unit.
    pub scale: f32,
    /// Inward offset of the house from the plot's bottom-left corner.
    pub house_offset: [f32; 2],
    /// Inward offset of the garage from the plot's bottom-left corner.
    pub garage_offset: [f32; 2],
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            plot_width: DEFAULT_PLOT_WIDTH,
            plot_height: DEFAULT_PLOT_HEIGHT,
            house_width: DEFAULT_HOUSE_WIDTH,
            house_height: DEFAULT_HOUSE_HEIGHT,
            garage_width: DEFAULT_GARAGE_WIDTH,
            garage_height: DEFAULT_GARAGE_HEIGHT,
            scale: DEFAULT_SCALE,
            house_offset: HOUSE_PLACEMENT_OFFSET.to_array(),
            garage_offset: GARAGE_PLACEMENT_OFFSET.to_array(),
        }
    }
}

impl SiteConfig {
    /// Dimensions as field text, validated later by the same path as user
    /// input.
    pub fn inputs(&self) -> SiteInputs {
        SiteInputs::from_values(
            Extent::new(self.plot_width, self.plot_height),
            Extent::new(self.house_width, self.house_height),
            Extent::new(self.garage_width, self.garage_height),
            self.scale,
        )
    }

    /// Placement offsets. Non-finite offsets fall back to the defaults.
    pub fn placement_policy(&self) -> PlacementPolicy {
        let defaults = PlacementPolicy::default();
        let offset = |raw: [f32; 2], fallback: Vec2| {
            let offset = Vec2::from_array(raw);
            if offset.is_finite() {
                offset
            } else {
                warn!("Ignoring non-finite placement offset {:?}", raw);
                fallback
            }
        };

        PlacementPolicy {
            house_offset: offset(self.house_offset, defaults.house_offset),
            garage_offset: offset(self.garage_offset, defaults.garage_offset),
        }
    }
}
