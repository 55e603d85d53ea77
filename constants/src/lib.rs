//! Shared constants for the site planner: default site dimensions,
//! placement policy and render settings.

/// Default house and garage placement offsets.
pub mod placement;

/// Colours, layers and line styling for the plan view.
pub mod render_settings;

/// Default site dimensions and configuration paths.
pub mod site_defaults;
