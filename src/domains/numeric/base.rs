//! Numeral base conversion between binary, octal, decimal and hexadecimal.
//!
//! Values are held as [`BigUint`], so inputs of any length convert exactly.

use num::{BigUint, ToPrimitive, Zero};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::NumericError;

/// Radix of a positional numeral system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    /// Base 2 (digits 0-1).
    #[serde(alias = "binary")]
    Bin,
    /// Base 8 (digits 0-7).
    #[serde(alias = "octal")]
    Oct,
    /// Base 10 (digits 0-9).
    #[serde(alias = "decimal")]
    Dec,
    /// Base 16 (digits 0-9, a-f, A-F).
    #[serde(alias = "hexadecimal")]
    Hex,
}

impl Base {
    /// All bases in display order.
    pub const ALL: [Base; 4] = [Base::Bin, Base::Oct, Base::Dec, Base::Hex];

    /// The numeric radix.
    pub fn radix(self) -> u32 {
        match self {
            Base::Bin => 2,
            Base::Oct => 8,
            Base::Dec => 10,
            Base::Hex => 16,
        }
    }

    /// Short identifier used in field names.
    pub fn key(self) -> &'static str {
        match self {
            Base::Bin => "bin",
            Base::Oct => "oct",
            Base::Dec => "dec",
            Base::Hex => "hex",
        }
    }

    /// Parse a digit string into an integer.
    ///
    /// The whole string is checked against the alphabet before any value is
    /// accumulated, so the first offending character is always reported.
    pub fn parse_digits(self, text: &str) -> Result<BigUint, NumericError> {
        let radix = self.radix();

        if let Some(bad) = text.chars().find(|c| c.to_digit(radix).is_none()) {
            return Err(NumericError::invalid_digit(self, bad));
        }

        // value = Σ digit_i × radix^(n-1-i), folded left to right
        let value = text
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(BigUint::zero(), |acc, digit| acc * radix + digit);

        Ok(value)
    }

    /// Render an integer in this base. Hexadecimal is upper-cased.
    pub fn render(self, value: &BigUint) -> String {
        let text = value.to_str_radix(self.radix());
        match self {
            Base::Hex => text.to_ascii_uppercase(),
            _ => text,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Base::Bin => "binary",
            Base::Oct => "octal",
            Base::Dec => "decimal",
            Base::Hex => "hex",
        };
        f.write_str(name)
    }
}

impl FromStr for Base {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bin" | "binary" | "2" => Ok(Base::Bin),
            "oct" | "octal" | "8" => Ok(Base::Oct),
            "dec" | "decimal" | "10" => Ok(Base::Dec),
            "hex" | "hexadecimal" | "16" => Ok(Base::Hex),
            _ => Err(NumericError::UnknownBase(s.to_string())),
        }
    }
}

/// The same value written in all four bases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BaseRepresentations {
    /// Binary digits.
    pub bin: String,
    /// Octal digits.
    pub oct: String,
    /// Decimal digits, no leading zeros.
    pub dec: String,
    /// Upper-case hexadecimal digits.
    pub hex: String,
}

impl BaseRepresentations {
    /// Render `value` in every base.
    pub fn from_value(value: &BigUint) -> Self {
        Self {
            bin: Base::Bin.render(value),
            oct: Base::Oct.render(value),
            dec: Base::Dec.render(value),
            hex: Base::Hex.render(value),
        }
    }

    /// Get the field for `base`.
    pub fn get(&self, base: Base) -> &str {
        match base {
            Base::Bin => &self.bin,
            Base::Oct => &self.oct,
            Base::Dec => &self.dec,
            Base::Hex => &self.hex,
        }
    }

    fn get_mut(&mut self, base: Base) -> &mut String {
        match base {
            Base::Bin => &mut self.bin,
            Base::Oct => &mut self.oct,
            Base::Dec => &mut self.dec,
            Base::Hex => &mut self.hex,
        }
    }

    /// True when every field is empty (the cleared state).
    pub fn is_empty(&self) -> bool {
        Base::ALL.iter().all(|b| self.get(*b).is_empty())
    }
}

/// Convert `text` written in `source` into all four bases.
///
/// Empty input yields the cleared representation rather than an error.
pub fn convert_base(text: &str, source: Base) -> Result<BaseRepresentations, NumericError> {
    if text.is_empty() {
        return Ok(BaseRepresentations::default());
    }

    let value = source.parse_digits(text)?;
    Ok(BaseRepresentations::from_value(&value))
}

/// Snapshot of a converter after an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct BaseConversion {
    /// Current field contents.
    #[serde(flatten)]
    pub fields: BaseRepresentations,

    /// Message for the last edit, if it was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Whether the value is at most 2^53 - 1, the largest integer below
    /// which every integer is exactly representable as an f64.
    pub safe_integer: bool,
}

/// Four linked fields where editing one re-renders the other three.
///
/// Invalid edits keep the literal text in the edited field and leave the
/// other fields at their last valid values.
#[derive(Debug, Clone, Default)]
pub struct BaseConverter {
    fields: BaseRepresentations,
    error: Option<NumericError>,
}

impl BaseConverter {
    /// Create a converter with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter resuming from previously displayed fields.
    pub fn with_fields(fields: BaseRepresentations) -> Self {
        Self {
            fields,
            error: None,
        }
    }

    /// Apply an edit of the `source` field.
    pub fn on_digits_changed(&mut self, text: &str, source: Base) -> BaseConversion {
        match convert_base(text, source) {
            Ok(fields) => {
                self.fields = fields;
                self.error = None;
            }
            Err(e) => {
                *self.fields.get_mut(source) = text.to_string();
                self.error = Some(e);
            }
        }
        self.snapshot()
    }

    /// Current field contents.
    pub fn fields(&self) -> &BaseRepresentations {
        &self.fields
    }

    /// Error from the last edit, if any.
    pub fn error(&self) -> Option<&NumericError> {
        self.error.as_ref()
    }

    /// Build a serialisable snapshot.
    pub fn snapshot(&self) -> BaseConversion {
        BaseConversion {
            fields: self.fields.clone(),
            error: self.error.as_ref().map(|e| e.to_string()),
            safe_integer: self.error.is_none() && is_safe_integer(&self.fields.dec),
        }
    }
}

/// Largest integer n such that every integer in 0..=n is exactly representable as f64.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

fn is_safe_integer(decimal: &str) -> bool {
    if decimal.is_empty() {
        return true;
    }
    Base::Dec
        .parse_digits(decimal)
        .ok()
        .and_then(|v| v.to_u64())
        .is_some_and(|v| v <= MAX_SAFE_INTEGER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_1010() {
        let r = convert_base("1010", Base::Bin).unwrap();
        assert_eq!(r.bin, "1010");
        assert_eq!(r.oct, "12");
        assert_eq!(r.dec, "10");
        assert_eq!(r.hex, "A");
    }

    #[test]
    fn test_hex_is_uppercased_and_accepts_lowercase() {
        let r = convert_base("ff", Base::Hex).unwrap();
        assert_eq!(r.hex, "FF");
        assert_eq!(r.dec, "255");
        assert_eq!(r.bin, "11111111");
    }

    #[test]
    fn test_decimal_drops_leading_zeros() {
        let r = convert_base("00042", Base::Dec).unwrap();
        assert_eq!(r.dec, "42");
        assert_eq!(r.hex, "2A");
    }

    #[test]
    fn test_zero() {
        let r = convert_base("0", Base::Oct).unwrap();
        assert_eq!(r, BaseRepresentations {
            bin: "0".into(),
            oct: "0".into(),
            dec: "0".into(),
            hex: "0".into(),
        });
    }

    #[test]
    fn test_invalid_hex_digit() {
        let err = convert_base("G", Base::Hex).unwrap_err();
        assert_eq!(err, NumericError::invalid_digit(Base::Hex, 'G'));
        assert_eq!(err.to_string(), "Invalid hex digit 'G'");
    }

    #[test]
    fn test_invalid_digit_names_base() {
        assert!(matches!(
            convert_base("102", Base::Bin),
            Err(NumericError::InvalidDigit { base: Base::Bin, character: '2' })
        ));
        assert!(matches!(
            convert_base("78", Base::Oct),
            Err(NumericError::InvalidDigit { base: Base::Oct, character: '8' })
        ));
        assert!(matches!(
            convert_base("-5", Base::Dec),
            Err(NumericError::InvalidDigit { base: Base::Dec, character: '-' })
        ));
    }

    #[test]
    fn test_empty_input_clears() {
        let r = convert_base("", Base::Dec).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn test_round_trip_through_every_base() {
        for n in [0u64, 1, 7, 8, 255, 4096, 123_456_789, MAX_SAFE_INTEGER, u64::MAX] {
            let reps = convert_base(&n.to_string(), Base::Dec).unwrap();
            for base in Base::ALL {
                let back = convert_base(reps.get(base), base).unwrap();
                assert_eq!(back.dec, n.to_string(), "round trip via {base}");
            }
        }
    }

    #[test]
    fn test_values_beyond_2_pow_53_are_exact() {
        // 2^64 + 1 would lose its low bit as a double
        let r = convert_base("18446744073709551617", Base::Dec).unwrap();
        assert_eq!(r.hex, "10000000000000001");

        let long_hex = "F".repeat(64);
        let r = convert_base(&long_hex, Base::Hex).unwrap();
        assert_eq!(r.bin, "1".repeat(256));
    }

    #[test]
    fn test_converter_stale_on_error() {
        let mut converter = BaseConverter::new();
        converter.on_digits_changed("1010", Base::Bin);

        let snapshot = converter.on_digits_changed("G", Base::Hex);
        assert_eq!(snapshot.fields.hex, "G");
        assert_eq!(snapshot.fields.bin, "1010");
        assert_eq!(snapshot.fields.oct, "12");
        assert_eq!(snapshot.fields.dec, "10");
        assert_eq!(snapshot.error.as_deref(), Some("Invalid hex digit 'G'"));
        assert!(converter.error().is_some());

        // Typing continues and recovers
        let snapshot = converter.on_digits_changed("1F", Base::Hex);
        assert_eq!(snapshot.fields.dec, "31");
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_converter_empty_clears_error() {
        let mut converter = BaseConverter::new();
        converter.on_digits_changed("9", Base::Oct);
        assert!(converter.error().is_some());

        let snapshot = converter.on_digits_changed("", Base::Oct);
        assert!(snapshot.fields.is_empty());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_safe_integer_flag() {
        let mut converter = BaseConverter::new();
        assert!(converter.on_digits_changed("9007199254740991", Base::Dec).safe_integer);
        assert!(!converter.on_digits_changed("9007199254740992", Base::Dec).safe_integer);
        assert!(!converter.on_digits_changed("9007199254740993", Base::Dec).safe_integer);
    }

    #[test]
    fn test_base_from_str() {
        assert_eq!("hexadecimal".parse::<Base>().unwrap(), Base::Hex);
        assert_eq!("BIN".parse::<Base>().unwrap(), Base::Bin);
        assert_eq!("8".parse::<Base>().unwrap(), Base::Oct);
        assert!("base64".parse::<Base>().is_err());
    }
}
