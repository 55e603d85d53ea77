//! Interactive tools that operate on the site layout.
//!
//! ## Available Tools
//!
//! ### Drag (`drag`)
//! - Left press over the house or garage grabs it (house wins on overlap)
//! - Pointer motion moves the grabbed structure, clamped inside the plot
//! - Left release or `Escape` ends the drag and notifies the frontend
//!
//! ### Setbacks (`setback`)
//! - Four dashed lines per structure, one to each plot side
//! - Distances in real units, two decimals, drawn as screen-space labels
//!   at the midpoint of each line
//!
//! ### Site Panel (`site_panel`, native only)
//! - Editable dimension fields with an Apply button and status line
//!
//! ## Frame Ordering
//!
//! ```text
//! SiteSystems::Reconfigure  rebuild layout from queued requests
//!   └─> SiteSystems::Input  drag press / motion / release
//!       └─> SiteSystems::Measure  sync sprites, lines, labels
//! ```

/// Pointer drag of house and garage.
pub mod drag;

/// Ray/plane and ray/rectangle intersection helpers.
pub mod ray;

/// Setback measurement, dashed lines and distance labels.
pub mod setback;

/// Native side panel for editing site dimensions.
#[cfg(not(target_arch = "wasm32"))]
pub mod site_panel;
