use bevy::prelude::*;
use constants::placement::{GARAGE_PLACEMENT_OFFSET, HOUSE_PLACEMENT_OFFSET};
use constants::render_settings::{GARAGE_COLOUR, GARAGE_Z, HOUSE_COLOUR, HOUSE_Z};
use serde::{Deserialize, Serialize};

use super::site_error::SiteError;
use super::site_inputs::SiteField;

/// Draggable building footprints on the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    House,
    Garage,
}

impl StructureKind {
    /// Hit-test order. The house wins when both footprints contain the pointer.
    pub const ALL: [Self; 2] = [Self::House, Self::Garage];

    /// Identifier used in labels, logs and RPC payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Garage => "garage",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Garage => "Garage",
        }
    }

    pub fn colour(&self) -> Color {
        match self {
            Self::House => HOUSE_COLOUR,
            Self::Garage => GARAGE_COLOUR,
        }
    }

    pub fn z_layer(&self) -> f32 {
        match self {
            Self::House => HOUSE_Z,
            Self::Garage => GARAGE_Z,
        }
    }
}

/// Width and height in real-world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel-space size for the given pixels-per-unit scale.
    pub fn to_pixels(self, scale: f32) -> Vec2 {
        Vec2::new(self.width * scale, self.height * scale)
    }

    fn fits_within(self, other: Extent) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

/// Default inward offsets from the plot's bottom-left corner, in real units.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlacementPolicy {
    pub house_offset: Vec2,
    pub garage_offset: Vec2,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            house_offset: HOUSE_PLACEMENT_OFFSET,
            garage_offset: GARAGE_PLACEMENT_OFFSET,
        }
    }
}

impl PlacementPolicy {
    pub fn offset(&self, kind: StructureKind) -> Vec2 {
        match kind {
            StructureKind::House => self.house_offset,
            StructureKind::Garage => self.garage_offset,
        }
    }
}

/// Real-world site dimensions plus the scale they are drawn at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteDimensions {
    pub plot: Extent,
    pub house: Extent,
    pub garage: Extent,
    /// Pixels per real-world unit.
    pub scale: f32,
}

impl SiteDimensions {
    pub fn structure(&self, kind: StructureKind) -> Extent {
        match kind {
            StructureKind::House => self.house,
            StructureKind::Garage => self.garage,
        }
    }

    /// Reject non-finite or non-positive values, sizes that overflow in
    /// pixels, and structures that cannot fit inside the plot.
    pub fn validate(&self) -> Result<(), SiteError> {
        let values = [
            (SiteField::PlotWidth, self.plot.width),
            (SiteField::PlotHeight, self.plot.height),
            (SiteField::HouseWidth, self.house.width),
            (SiteField::HouseHeight, self.house.height),
            (SiteField::GarageWidth, self.garage.width),
            (SiteField::GarageHeight, self.garage.height),
            (SiteField::Scale, self.scale),
        ];

        for (field, value) in values {
            if !value.is_finite() {
                return Err(SiteError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(SiteError::NonPositive { field, value });
            }
        }

        // Every pixel size must stay finite too.
        for (field, value) in &values[..values.len() - 1] {
            if !(value * self.scale).is_finite() {
                return Err(SiteError::TooLargeAtScale { field: *field });
            }
        }

        for kind in StructureKind::ALL {
            if !self.structure(kind).fits_within(self.plot) {
                return Err(SiteError::ExceedsPlot { structure: kind });
            }
        }

        Ok(())
    }
}

/// Axis-aligned rectangle in pixel/world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub size: Vec2,
    pub center: Vec2,
}

impl Footprint {
    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_size()
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_size()
    }

    /// Edges count as inside.
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

/// The whole plan: plot size, structure footprints and the scale they were
/// derived with. Replaced wholesale on reconfiguration.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SiteLayout {
    pub dimensions: SiteDimensions,
    /// Plot size in pixels. The plot is centred on the world origin.
    pub plot_size: Vec2,
    pub house: Footprint,
    pub garage: Footprint,
    /// Bumped every time the layout is rebuilt, so drag state can tell
    /// whether the structure it grabbed still exists.
    pub generation: u32,
}

impl SiteLayout {
    pub fn from_dimensions(
        dimensions: SiteDimensions,
        policy: &PlacementPolicy,
    ) -> Result<Self, SiteError> {
        dimensions.validate()?;

        let scale = dimensions.scale;
        let plot_size = dimensions.plot.to_pixels(scale);
        let place = |kind: StructureKind| {
            let size = dimensions.structure(kind).to_pixels(scale);
            let center = -plot_size * 0.5 + size * 0.5 + policy.offset(kind) * scale;
            Footprint {
                size,
                center: clamp_center(plot_size, size, center),
            }
        };

        Ok(Self {
            dimensions,
            plot_size,
            house: place(StructureKind::House),
            garage: place(StructureKind::Garage),
            generation: 0,
        })
    }

    pub fn scale(&self) -> f32 {
        self.dimensions.scale
    }

    pub fn plot_half_size(&self) -> Vec2 {
        self.plot_size * 0.5
    }

    pub fn footprint(&self, kind: StructureKind) -> &Footprint {
        match kind {
            StructureKind::House => &self.house,
            StructureKind::Garage => &self.garage,
        }
    }

    fn footprint_mut(&mut self, kind: StructureKind) -> &mut Footprint {
        match kind {
            StructureKind::House => &mut self.house,
            StructureKind::Garage => &mut self.garage,
        }
    }

    /// Closest center to `proposed` that keeps the structure inside the plot.
    pub fn clamp_center(&self, kind: StructureKind, proposed: Vec2) -> Vec2 {
        clamp_center(self.plot_size, self.footprint(kind).size, proposed)
    }

    /// Move a structure towards `proposed`, clamped to the plot. Returns the
    /// center actually written.
    pub fn move_structure(&mut self, kind: StructureKind, proposed: Vec2) -> Vec2 {
        let center = self.clamp_center(kind, proposed);
        self.footprint_mut(kind).center = center;
        center
    }

    pub fn to_real(&self, pixels: f32) -> f32 {
        pixels / self.scale()
    }

    pub fn to_pixels(&self, real: f32) -> f32 {
        real * self.scale()
    }
}

/// Each axis is clamped on its own. Never panics, even for oversized
/// structures: the lower bound wins.
fn clamp_center(plot_size: Vec2, size: Vec2, proposed: Vec2) -> Vec2 {
    let max = (plot_size - size) * 0.5;
    let min = -max;
    proposed.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn dims(plot: (f32, f32), house: (f32, f32), garage: (f32, f32), scale: f32) -> SiteDimensions {
        SiteDimensions {
            plot: Extent::new(plot.0, plot.1),
            house: Extent::new(house.0, house.1),
            garage: Extent::new(garage.0, garage.1),
            scale,
        }
    }

    #[test]
    fn test_pixel_dimensions_scale_real_dimensions() {
        let layout = SiteLayout::from_dimensions(
            dims((40.0, 30.0), (12.0, 9.0), (6.0, 6.0), 15.0),
            &PlacementPolicy::default(),
        )
        .unwrap();

        assert_eq!(layout.plot_size, Vec2::new(600.0, 450.0));
        assert_eq!(layout.house.size, Vec2::new(180.0, 135.0));
        assert_eq!(layout.garage.size, Vec2::new(90.0, 90.0));
    }

    #[test]
    fn test_default_placement_offsets_from_bottom_left() {
        let layout = SiteLayout::from_dimensions(
            dims((40.0, 30.0), (12.0, 9.0), (6.0, 6.0), 10.0),
            &PlacementPolicy::default(),
        )
        .unwrap();

        // House: -200 + 60 + 125 = -15, -150 + 45 + 120 = 15
        assert!((layout.house.center - Vec2::new(-15.0, 15.0)).length() < 1e-3);
        // Garage: -200 + 30 + 31 = -139, -150 + 30 + 50 = -70
        assert!((layout.garage.center - Vec2::new(-139.0, -70.0)).length() < 1e-3);
    }

    #[test]
    fn test_default_placement_clamped_into_small_plot() {
        let layout = SiteLayout::from_dimensions(
            dims((10.0, 10.0), (6.0, 6.0), (2.0, 2.0), 1.0),
            &PlacementPolicy::default(),
        )
        .unwrap();

        assert_eq!(layout.house.max(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_validate_rejects_non_positive_scale() {
        let err = dims((20.0, 15.0), (6.0, 4.0), (3.0, 3.0), 0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SiteError::NonPositive {
                field: SiteField::Scale,
                value: 0.0
            }
        );
    }

    #[test]
    fn test_validate_rejects_nan_dimension() {
        let err = dims((20.0, f32::NAN), (6.0, 4.0), (3.0, 3.0), 10.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SiteError::NonFinite {
                field: SiteField::PlotHeight
            }
        );
    }

    #[test]
    fn test_validate_rejects_pixel_overflow() {
        let dimensions = dims((1e20, 1e20), (1e20, 1e20), (3.0, 3.0), 1e20);
        assert_eq!(
            dimensions.validate().unwrap_err(),
            SiteError::TooLargeAtScale {
                field: SiteField::PlotWidth
            }
        );
        assert!(SiteLayout::from_dimensions(dimensions, &PlacementPolicy::default()).is_err());
    }

    #[test]
    fn test_validate_rejects_structure_larger_than_plot() {
        let err = dims((20.0, 15.0), (6.0, 4.0), (3.0, 16.0), 10.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SiteError::ExceedsPlot {
                structure: StructureKind::Garage
            }
        );
    }

    #[test]
    fn test_move_structure_clamps_each_axis() {
        let mut layout = SiteLayout::from_dimensions(
            dims((20.0, 15.0), (6.0, 4.0), (3.0, 3.0), 10.0),
            &PlacementPolicy::default(),
        )
        .unwrap();

        let center = layout.move_structure(StructureKind::House, Vec2::new(1000.0, 10.0));
        assert_eq!(center, Vec2::new(70.0, 10.0));
        assert_eq!(layout.house.center, center);

        let center = layout.move_structure(StructureKind::House, Vec2::new(-5.0, -1000.0));
        assert_eq!(center, Vec2::new(-5.0, -55.0));
    }

    #[test]
    fn test_clamp_keeps_structure_inside_plot_for_random_inputs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5e7_bac4);

        for _ in 0..2000 {
            let plot = Vec2::new(rng.gen_range(1.0..2000.0), rng.gen_range(1.0..2000.0));
            let size = Vec2::new(
                rng.gen_range(0.0..=plot.x),
                rng.gen_range(0.0..=plot.y),
            );
            let proposed = Vec2::new(
                rng.gen_range(-5000.0..5000.0),
                rng.gen_range(-5000.0..5000.0),
            );

            let center = clamp_center(plot, size, proposed);
            let tolerance = 1e-3 * plot.max_element();
            assert!(center.x.abs() + size.x * 0.5 <= plot.x * 0.5 + tolerance);
            assert!(center.y.abs() + size.y * 0.5 <= plot.y * 0.5 + tolerance);
        }
    }

    #[test]
    fn test_clamp_leaves_inside_positions_untouched() {
        let center = clamp_center(
            Vec2::new(200.0, 150.0),
            Vec2::new(60.0, 40.0),
            Vec2::new(12.5, -3.0),
        );
        assert_eq!(center, Vec2::new(12.5, -3.0));
    }

    #[test]
    fn test_scale_round_trip() {
        let layout = SiteLayout::from_dimensions(
            dims((40.0, 30.0), (12.0, 9.0), (6.0, 6.0), 7.3),
            &PlacementPolicy::default(),
        )
        .unwrap();

        for real in [0.0_f32, 0.01, 1.0, 3.75, 123.456] {
            let back = layout.to_real(layout.to_pixels(real));
            assert!((back - real).abs() <= 1e-4 * real.max(1.0));
        }
    }

    #[test]
    fn test_footprint_contains_edges() {
        let footprint = Footprint {
            size: Vec2::new(10.0, 4.0),
            center: Vec2::new(5.0, 0.0),
        };
        assert!(footprint.contains(Vec2::new(0.0, 2.0)));
        assert!(footprint.contains(Vec2::new(10.0, -2.0)));
        assert!(!footprint.contains(Vec2::new(10.1, 0.0)));
    }
}
