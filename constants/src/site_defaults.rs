/// Startup site configuration, relative to the asset folder.
pub const SITE_CONFIG_PATH: &str = "site_config.json";

/// Built-in site used when the configuration file is missing or invalid.
pub const DEFAULT_PLOT_WIDTH: f32 = 40.0;
pub const DEFAULT_PLOT_HEIGHT: f32 = 30.0;
pub const DEFAULT_HOUSE_WIDTH: f32 = 12.0;
pub const DEFAULT_HOUSE_HEIGHT: f32 = 9.0;
pub const DEFAULT_GARAGE_WIDTH: f32 = 6.0;
pub const DEFAULT_GARAGE_HEIGHT: f32 = 6.0;

/// Pixels per real-world unit.
pub const DEFAULT_SCALE: f32 = 15.0;
