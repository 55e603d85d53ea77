//! Side panel for editing site dimensions (native only).
//!
//! Each input is a clickable text field. The focused field takes digits,
//! `.`, `-` and Backspace; Tab moves focus to the next field and Enter
//! applies. The Apply button does the same as Enter. Applying never parses
//! locally: the raw text goes out in a `ReconfigureSiteEvent` and the status
//! line reports whatever the scene decided. The fields are refilled from
//! every newly built layout, whichever source requested it.
//!
//! The panel root carries an `Interaction`, so presses anywhere over it are
//! ignored by the drag tool.

/// Button and keyboard handling for the panel.
pub mod interactions;

/// Panel resource and marker components.
pub mod state;

/// Panel spawning and systems that mirror state into the UI.
pub mod ui;

use bevy::prelude::*;

use crate::engine::scene::site_model::SiteLayout;


use state::SitePanelState;

use interactions::{apply_button_interaction, input_field_interaction, panel_keyboard_input};
use ui::{
    reflect_field_values, reflect_site_status, refill_panel_from_layout, spawn_site_panel_ui,
};

pub struct SitePanelPlugin;

impl Plugin for SitePanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SitePanelState>()
            .add_systems(Startup, spawn_site_panel_ui)
            .add_systems(
                Update,
                (
                    refill_panel_from_layout.run_if(resource_exists::<SiteLayout>),
                    input_field_interaction,
                    apply_button_interaction,
                    panel_keyboard_input,
                    reflect_field_values,
                    reflect_site_status,
                )
                    .chain(),
            );
    }
}
