//! Category-scoped unit conversion.
//!
//! Linear categories store a rate per unit expressing "units per canonical
//! unit" (meter, kilogram, byte), so the canonical unit's rate is exactly 1.
//! Temperature is converted through Celsius with affine formulas.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::NumericError;

/// Value the input resets to when the category changes.
pub const DEFAULT_VALUE: f64 = 1.0;

/// A unit within a category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct Unit {
    /// Short symbol used as the unit key (e.g. `km`).
    pub symbol: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Units per canonical unit; `None` for temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl Unit {
    const fn linear(symbol: &'static str, label: &'static str, rate: f64) -> Self {
        Self {
            symbol,
            label,
            rate: Some(rate),
        }
    }

    const fn affine(symbol: &'static str, label: &'static str) -> Self {
        Self {
            symbol,
            label,
            rate: None,
        }
    }
}

const KIB: f64 = 1024.0;

const LENGTH_UNITS: &[Unit] = &[
    Unit::linear("m", "Meter", 1.0),
    Unit::linear("km", "Kilometer", 0.001),
    Unit::linear("cm", "Centimeter", 100.0),
    Unit::linear("mm", "Millimeter", 1000.0),
    Unit::linear("ft", "Feet", 3.28084),
    Unit::linear("in", "Inch", 39.3701),
    Unit::linear("yd", "Yard", 1.09361),
    Unit::linear("mi", "Mile", 0.000621371),
];

const WEIGHT_UNITS: &[Unit] = &[
    Unit::linear("kg", "Kilogram", 1.0),
    Unit::linear("g", "Gram", 1000.0),
    Unit::linear("mg", "Milligram", 1_000_000.0),
    Unit::linear("lb", "Pound", 2.20462),
    Unit::linear("oz", "Ounce", 35.274),
    Unit::linear("st", "Stone", 0.157473),
];

const TEMPERATURE_UNITS: &[Unit] = &[
    Unit::affine("c", "Celsius"),
    Unit::affine("f", "Fahrenheit"),
    Unit::affine("k", "Kelvin"),
];

const DATA_UNITS: &[Unit] = &[
    Unit::linear("b", "Byte", 1.0),
    Unit::linear("kb", "Kilobyte", 1.0 / KIB),
    Unit::linear("mb", "Megabyte", 1.0 / (KIB * KIB)),
    Unit::linear("gb", "Gigabyte", 1.0 / (KIB * KIB * KIB)),
    Unit::linear("tb", "Terabyte", 1.0 / (KIB * KIB * KIB * KIB)),
    Unit::linear("pb", "Petabyte", 1.0 / (KIB * KIB * KIB * KIB * KIB)),
];

/// A family of mutually convertible units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
    /// Digital storage (binary multiples of a byte).
    #[serde(alias = "storage")]
    Data,
}

impl UnitCategory {
    /// All categories in display order.
    pub const ALL: [UnitCategory; 4] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Temperature,
        UnitCategory::Data,
    ];

    /// Stable identifier.
    pub fn key(self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Weight => "weight",
            UnitCategory::Temperature => "temperature",
            UnitCategory::Data => "data",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            UnitCategory::Length => "Length",
            UnitCategory::Weight => "Weight",
            UnitCategory::Temperature => "Temperature",
            UnitCategory::Data => "Digital Storage",
        }
    }

    /// Units of this category, in display order.
    pub fn units(self) -> &'static [Unit] {
        match self {
            UnitCategory::Length => LENGTH_UNITS,
            UnitCategory::Weight => WEIGHT_UNITS,
            UnitCategory::Temperature => TEMPERATURE_UNITS,
            UnitCategory::Data => DATA_UNITS,
        }
    }

    /// Look up a unit by symbol (ASCII case-insensitive).
    pub fn unit(self, symbol: &str) -> Result<&'static Unit, NumericError> {
        let symbol = symbol.trim();
        self.units()
            .iter()
            .find(|u| u.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| NumericError::unknown_unit(self, symbol))
    }

    /// The category defining `symbol`, if any. Symbols are unique across categories.
    pub fn containing(symbol: &str) -> Option<UnitCategory> {
        Self::ALL.into_iter().find(|c| c.unit(symbol).is_ok())
    }

    /// Selector state after switching to this category.
    pub fn defaults(self) -> CategoryDefaults {
        let units = self.units();
        let from = units[0];
        let to = units.get(1).copied().unwrap_or(from);

        CategoryDefaults {
            category: self,
            name: self.name(),
            units: units.to_vec(),
            default_from: from.symbol,
            default_to: to.symbol,
            default_value: DEFAULT_VALUE,
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for UnitCategory {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" => Ok(UnitCategory::Length),
            "weight" | "mass" => Ok(UnitCategory::Weight),
            "temperature" | "temp" => Ok(UnitCategory::Temperature),
            "data" | "storage" | "digital storage" => Ok(UnitCategory::Data),
            _ => Err(NumericError::UnknownCategory(s.to_string())),
        }
    }
}

/// Selector state produced by a category switch.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CategoryDefaults {
    /// Category identifier.
    pub category: UnitCategory,
    /// Category display name.
    pub name: &'static str,
    /// Units available in the category.
    pub units: Vec<Unit>,
    /// Symbol preselected in the "from" selector.
    pub default_from: &'static str,
    /// Symbol preselected in the "to" selector.
    pub default_to: &'static str,
    /// Input value after the reset.
    pub default_value: f64,
}

/// Selector state for `category` (first two units, value reset to 1).
pub fn on_category_changed(category: UnitCategory) -> CategoryDefaults {
    category.defaults()
}

/// Recompute the converted value after any input change.
pub fn on_value_changed(
    value: f64,
    from: &str,
    to: &str,
    category: UnitCategory,
) -> Result<f64, NumericError> {
    convert(value, from, to, category)
}

/// Convert `value` from one unit to another within `category`.
///
/// No rounding is applied.
pub fn convert(value: f64, from: &str, to: &str, category: UnitCategory) -> Result<f64, NumericError> {
    let from = category.unit(from)?;
    let to = category.unit(to)?;

    match (from.rate, to.rate) {
        (Some(from_rate), Some(to_rate)) => Ok(value / from_rate * to_rate),
        _ => Ok(convert_temperature(value, from.symbol, to.symbol)),
    }
}

fn convert_temperature(value: f64, from: &str, to: &str) -> f64 {
    if from == to {
        return value;
    }

    let celsius = match from {
        "f" => (value - 32.0) * 5.0 / 9.0,
        "k" => value - 273.15,
        _ => value,
    };

    match to {
        "f" => celsius * 9.0 / 5.0 + 32.0,
        "k" => celsius + 273.15,
        _ => celsius,
    }
}

/// Format a converted value with at most `max_fraction_digits` decimals.
///
/// Trailing zeros are dropped; negative zero prints as `0`.
pub fn format_display(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let text = format!("{:.*}", max_fraction_digits, value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };

    if text == "-0" { "0".to_string() } else { text }
}
