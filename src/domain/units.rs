use crate::utils::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weight units the service understands. Kilograms is the pivot for every
/// conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeightUnit {
    #[default]
    Kilograms,
    Ounces,
    Pounds,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 3] = [
        WeightUnit::Kilograms,
        WeightUnit::Ounces,
        WeightUnit::Pounds,
    ];

    /// Units per kilogram.
    pub fn factor(self) -> f64 {
        match self {
            WeightUnit::Kilograms => 1.0,
            WeightUnit::Ounces => 35.274,
            WeightUnit::Pounds => 2.20462,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kilograms => "KILOGRAMS",
            WeightUnit::Ounces => "OUNCES",
            WeightUnit::Pounds => "POUNDS",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = ServiceError;

    /// Exact, case-sensitive match on the upper-case unit name.
    fn from_str(s: &str) -> Result<Self> {
        WeightUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| ServiceError::InvalidUnit {
                unit: s.to_string(),
            })
    }
}

pub fn is_unit_valid(unit: &str) -> bool {
    unit.parse::<WeightUnit>().is_ok()
}

/// Converts through kilograms. No rounding is applied.
pub fn convert_weight(magnitude: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    magnitude / from.factor() * to.factor()
}
