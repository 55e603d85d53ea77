//! Asset types loaded through the Bevy asset server.

/// Startup site configuration deserialised from JSON.
pub mod site_config;
