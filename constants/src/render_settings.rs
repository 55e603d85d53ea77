use bevy::color::Color;

pub const PLOT_COLOUR: Color = Color::srgb(1.0, 1.0, 0.0);
pub const HOUSE_COLOUR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const GARAGE_COLOUR: Color = Color::srgb(0.0, 0.0, 1.0);
pub const CLEAR_COLOUR: Color = Color::srgb(0.08, 0.09, 0.11);

/// Setback lines are drawn in the same blue for both structures.
pub const SETBACK_LINE_COLOUR: Color = Color::srgb(0.0, 0.0, 1.0);
pub const SETBACK_LINE_WIDTH: f32 = 1.5;
pub const SETBACK_DASH_LENGTH: f32 = 4.0;
pub const SETBACK_GAP_LENGTH: f32 = 4.0;

pub const LABEL_FONT_SIZE: f32 = 14.0;
pub const LABEL_COLOUR: Color = Color::srgb(0.05, 0.05, 0.05);

/// Z layers for the plan sprites. House sits above garage so the drawing
/// order matches hit-test priority.
pub const PLOT_Z: f32 = 0.0;
pub const GARAGE_Z: f32 = 1.0;
pub const HOUSE_Z: f32 = 2.0;

pub const CAMERA_NEAR: f32 = -1000.0;
pub const CAMERA_FAR: f32 = 1000.0;
