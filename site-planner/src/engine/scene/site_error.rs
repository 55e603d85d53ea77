use std::fmt;

use super::site_inputs::SiteField;
use super::site_model::StructureKind;

/// Reasons a set of site inputs cannot become a layout.
///
/// None of these are fatal: the current scene stays in place and the
/// message is shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteError {
    /// The field text is not a floating point number.
    InvalidNumber { field: SiteField, raw: String },
    /// NaN or infinite.
    NonFinite { field: SiteField },
    /// Finite in real units, but overflows once multiplied by the scale.
    TooLargeAtScale { field: SiteField },
    /// Zero or negative dimension or scale.
    NonPositive { field: SiteField, value: f32 },
    /// The structure is wider or taller than the plot.
    ExceedsPlot { structure: StructureKind },
}

impl SiteError {
    /// Input field the error refers to, if any.
    pub fn field(&self) -> Option<SiteField> {
        match self {
            SiteError::InvalidNumber { field, .. }
            | SiteError::NonFinite { field }
            | SiteError::TooLargeAtScale { field }
            | SiteError::NonPositive { field, .. } => Some(*field),
            SiteError::ExceedsPlot { .. } => None,
        }
    }
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::InvalidNumber { field, raw } => {
                write!(f, "{}: '{raw}' is not a number", field.label())
            }
            SiteError::NonFinite { field } => {
                write!(f, "{} must be a finite number", field.label())
            }
            SiteError::TooLargeAtScale { field } => {
                write!(f, "{} is too large to draw at this scale", field.label())
            }
            SiteError::NonPositive { field, value } => {
                write!(f, "{} must be greater than zero (got {value})", field.label())
            }
            SiteError::ExceedsPlot { structure } => {
                write!(f, "{} does not fit inside the plot", structure.display_name())
            }
        }
    }
}

impl std::error::Error for SiteError {}
