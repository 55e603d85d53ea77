//! Site scene model and its lifecycle.
//!
//! Real-world dimensions and a scale factor are parsed and validated into a
//! `SiteLayout`, the single resource holding plot size and structure
//! footprints in pixel space. Reconfiguration replaces the layout and every
//! site entity wholesale.

/// Rebuilding the layout and site entities from new inputs.
pub mod reconfigure;

/// Plot and structure sprites mirrored from the layout.
pub mod site_entities;

/// Validation errors for site inputs.
pub mod site_error;

/// Raw input fields and their parsing.
pub mod site_inputs;

/// Pixel-space layout derivation, placement policy and clamping.
pub mod site_model;
