//! SVG length units.
//!
//! Tiles are authored in a drawing tool that may default to physical units,
//! so a dimension string can carry any of the CSS absolute unit suffixes.

use thiserror::Error;

pub const PX_PER_IN: f64 = 96.0;
pub const PX_PER_MM: f64 = 0.039370787 * PX_PER_IN;
pub const PX_PER_PT: f64 = 0.0138888889 * PX_PER_IN;
pub const PX_PER_PC: f64 = 0.1666666667 * PX_PER_IN;
pub const PX_PER_FT: f64 = PX_PER_IN * 12.0;
pub const PX_PER_CM: f64 = 0.3937007874 * PX_PER_IN;
pub const PX_PER_M: f64 = 0.0254 * PX_PER_IN;

/// Suffixes in match order. `m` has to come after `mm` and `cm`.
const UNITS: &[(&str, f64)] = &[
    ("in", PX_PER_IN),
    ("mm", PX_PER_MM),
    ("pt", PX_PER_PT),
    ("pc", PX_PER_PC),
    ("ft", PX_PER_FT),
    ("cm", PX_PER_CM),
    ("m", PX_PER_M),
];

#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    #[error("unable to convert {0:?}: no numeric value")]
    Empty(String),

    #[error("unable to convert {0:?}: {1}")]
    Invalid(String, #[source] std::num::ParseFloatError),
}

/// Pixels per unit for the suffix of `value`.
///
/// Unknown or missing suffixes are treated as pixels and yield `1.0`.
pub fn unit_multiplier(value: &str) -> f64 {
    UNITS
        .iter()
        .find(|(suffix, _)| value.ends_with(suffix))
        .map_or(1.0, |(_, px)| *px)
}

/// Numeric part of a dimension string.
///
/// Every character that is not an ASCII digit or `.` is dropped before
/// parsing, so `"80.5mm"` yields `80.5`.
pub fn magnitude(value: &str) -> Result<f64, UnitError> {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if digits.is_empty() {
        return Err(UnitError::Empty(value.to_string()));
    }

    digits
        .parse()
        .map_err(|e| UnitError::Invalid(value.to_string(), e))
}
