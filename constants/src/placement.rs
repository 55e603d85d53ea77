use bevy::math::Vec2;

/// House offset from the plot's bottom-left corner, in real-world units.
pub const HOUSE_PLACEMENT_OFFSET: Vec2 = Vec2::new(12.5, 12.0);

/// Garage offset from the plot's bottom-left corner, in real-world units.
pub const GARAGE_PLACEMENT_OFFSET: Vec2 = Vec2::new(3.1, 5.0);
