use super::site_error::SiteError;
use super::site_model::{Extent, SiteDimensions};

/// User-editable site inputs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteField {
    PlotWidth,
    PlotHeight,
    HouseWidth,
    HouseHeight,
    GarageWidth,
    GarageHeight,
    Scale,
}

impl SiteField {
    pub const ALL: [Self; 7] = [
        Self::PlotWidth,
        Self::PlotHeight,
        Self::HouseWidth,
        Self::HouseHeight,
        Self::GarageWidth,
        Self::GarageHeight,
        Self::Scale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PlotWidth => "Plot width",
            Self::PlotHeight => "Plot height",
            Self::HouseWidth => "House width",
            Self::HouseHeight => "House height",
            Self::GarageWidth => "Garage width",
            Self::GarageHeight => "Garage height",
            Self::Scale => "Scale (px/unit)",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// Next field in display order, wrapping around.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// Raw text of every input field. Parsing happens only when the user
/// applies the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteInputs {
    values: [String; 7],
}

impl SiteInputs {
    pub fn from_values(plot: Extent, house: Extent, garage: Extent, scale: f32) -> Self {
        let numbers = [
            plot.width,
            plot.height,
            house.width,
            house.height,
            garage.width,
            garage.height,
            scale,
        ];
        Self {
            values: numbers.map(|value| value.to_string()),
        }
    }

    pub fn from_dimensions(dimensions: &SiteDimensions) -> Self {
        Self::from_values(
            dimensions.plot,
            dimensions.house,
            dimensions.garage,
            dimensions.scale,
        )
    }

    pub fn get(&self, field: SiteField) -> &str {
        &self.values[field.index()]
    }

    pub fn get_mut(&mut self, field: SiteField) -> &mut String {
        &mut self.values[field.index()]
    }

    pub fn set(&mut self, field: SiteField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Parse every field and validate the resulting dimensions.
    pub fn parse(&self) -> Result<SiteDimensions, SiteError> {
        let value = |field: SiteField| parse_field(field, self.get(field));

        let dimensions = SiteDimensions {
            plot: Extent::new(value(SiteField::PlotWidth)?, value(SiteField::PlotHeight)?),
            house: Extent::new(value(SiteField::HouseWidth)?, value(SiteField::HouseHeight)?),
            garage: Extent::new(value(SiteField::GarageWidth)?, value(SiteField::GarageHeight)?),
            scale: value(SiteField::Scale)?,
        };
        dimensions.validate()?;
        Ok(dimensions)
    }
}

fn parse_field(field: SiteField, raw: &str) -> Result<f32, SiteError> {
    raw.trim()
        .parse::<f32>()
        .map_err(|_| SiteError::InvalidNumber {
            field,
            raw: raw.to_string(),
        })
}
