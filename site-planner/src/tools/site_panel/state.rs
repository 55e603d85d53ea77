use bevy::prelude::*;

use crate::engine::scene::site_inputs::{SiteField, SiteInputs};

pub const PANEL_WIDTH: f32 = 240.0;

/// Field text being edited in the panel, and which field has focus.
#[derive(Resource, Default)]
pub struct SitePanelState {
    pub inputs: SiteInputs,
    pub focused: Option<SiteField>,
    /// Layout generation the fields were last filled from.
    pub filled_from: Option<u32>,
}

impl SitePanelState {
    /// Refill the fields when a different layout generation is on screen.
    /// Returns whether the fields changed.
    pub fn refill(&mut self, generation: u32, inputs: SiteInputs) -> bool {
        if self.filled_from == Some(generation) {
            return false;
        }
        self.filled_from = Some(generation);
        self.inputs = inputs;
        true
    }
}

// Components
#[derive(Component)]
pub struct SitePanelRoot;
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField(pub SiteField);
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFieldText(pub SiteField);
#[derive(Component)]
pub struct ApplyButton;
#[derive(Component)]
pub struct StatusText;
