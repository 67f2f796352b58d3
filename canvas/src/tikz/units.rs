//! Length units accepted in circle radii.

use super::ParseError;

/// Unit suffix and the factor that converts a value in that unit to diagram centimeters.
///
/// A missing suffix means centimeters.
pub const UNITS: [(&str, f64); 9] = [
    ("pt", 28.4528),
    ("mm", 10.0),
    ("cm", 1.0),
    ("ex", 4.3),
    ("em", 2.37),
    ("bp", 28.3465),
    ("dd", 26.6),
    ("pc", 2.3710),
    ("in", 0.3927),
];

/// Conversion factor for `unit` (case-insensitive, surrounding whitespace ignored).
///
/// # Errors
///
/// Returns [`ParseError::UnknownUnit`] for a suffix outside the table.
pub fn unit_factor(unit: &str) -> Result<f64, ParseError> {
    let unit = unit.trim();
    if unit.is_empty() {
        return Ok(1.0);
    }
    UNITS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(unit))
        .map(|&(_, factor)| factor)
        .ok_or_else(|| ParseError::UnknownUnit(unit.to_owned()))
}
