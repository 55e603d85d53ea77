//! Startup loading of the site configuration asset.

/// Site config loading, default fallback and the initial reconfiguration.
pub mod config_loader;
