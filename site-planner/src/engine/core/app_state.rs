use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the startup site configuration.
    #[default]
    Loading,
    Running,
}

/// Per-frame ordering: reconfiguration is applied first, then pointer input,
/// then measurement reads the settled positions.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteSystems {
    Reconfigure,
    Input,
    Measure,
}

pub fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("→ Site configured, transitioning to Running state");
    next_state.set(AppState::Running);
}
