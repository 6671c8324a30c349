//! Saaty intensity value object (1 to 9 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Intensity of importance on the Saaty 1-9 scale.
///
/// Even values are the intermediate steps between their odd neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SaatyIntensity {
    #[default]
    Equal = 1,
    EqualToModerate = 2,
    Moderate = 3,
    ModerateToStrong = 4,
    Strong = 5,
    StrongToVeryStrong = 6,
    VeryStrong = 7,
    VeryStrongToExtreme = 8,
    Extreme = 9,
}

impl SaatyIntensity {
    /// All intensities in ascending order.
    pub const ALL: [SaatyIntensity; 9] = [
        SaatyIntensity::Equal,
        SaatyIntensity::EqualToModerate,
        SaatyIntensity::Moderate,
        SaatyIntensity::ModerateToStrong,
        SaatyIntensity::Strong,
        SaatyIntensity::StrongToVeryStrong,
        SaatyIntensity::VeryStrong,
        SaatyIntensity::VeryStrongToExtreme,
        SaatyIntensity::Extreme,
    ];

    /// Creates an intensity from an integer, returning error if out of range.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.value() == value)
            .ok_or_else(|| ValidationError::out_of_range("intensity", 1, 9, value as i32))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            SaatyIntensity::Equal => "Equal importance",
            SaatyIntensity::EqualToModerate => "Between equal and moderate",
            SaatyIntensity::Moderate => "Moderate importance",
            SaatyIntensity::ModerateToStrong => "Between moderate and strong",
            SaatyIntensity::Strong => "Strong importance",
            SaatyIntensity::StrongToVeryStrong => "Between strong and very strong",
            SaatyIntensity::VeryStrong => "Very strong importance",
            SaatyIntensity::VeryStrongToExtreme => "Between very strong and extreme",
            SaatyIntensity::Extreme => "Extreme importance",
        }
    }

    /// Converts to a matrix judgment for the cell `(row, col)`.
    ///
    /// When the row item is the more important one the judgment is the
    /// intensity itself, otherwise its reciprocal.
    pub fn as_judgment(&self, favours_row: bool) -> f64 {
        let v = f64::from(self.value());
        if favours_row {
            v
        } else {
            1.0 / v
        }
    }
}

impl fmt::Display for SaatyIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value(), self.label())
    }
}
