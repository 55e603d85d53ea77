//! Plan-view camera and cursor picking.
//!
//! The camera is a fixed orthographic projection centred on the plot, one
//! world unit per logical pixel, so pixel-space layout coordinates can be
//! drawn and picked without further scaling.

/// Plan camera spawning and cursor rays.
pub mod plan_camera;
