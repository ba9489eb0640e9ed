//! Descriptive statistics over a delimited list of numbers.
//!
//! Input is tokenised, non-numeric tokens are dropped, and the remaining
//! values are summarised. An empty sample produces `None`, which callers
//! must keep distinct from a sample of zeros.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::error::NumericError;

/// Leading decimal literal of a token (sign, digits, fraction, exponent).
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number pattern")
});

/// How the raw text is split into tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// Commas and any whitespace.
    #[default]
    #[serde(alias = ",")]
    Comma,
    /// Any whitespace.
    #[serde(alias = " ")]
    Space,
    /// Line breaks only (`\n` or `\r\n`).
    #[serde(alias = "\n", alias = "\\n")]
    Newline,
    /// Semicolons and any whitespace.
    #[serde(alias = ";")]
    Semicolon,
}

impl Delimiter {
    fn separator(self) -> Option<char> {
        match self {
            Delimiter::Comma => Some(','),
            Delimiter::Space => Some(' '),
            Delimiter::Semicolon => Some(';'),
            Delimiter::Newline => None,
        }
    }

    /// Split `text` into raw tokens.
    pub fn tokenize(self, text: &str) -> Vec<&str> {
        match self.separator() {
            Some(sep) => text
                .split(|c: char| c == sep || c.is_whitespace())
                .collect(),
            None => text
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect(),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Comma => "comma",
            Delimiter::Space => "space",
            Delimiter::Newline => "newline",
            Delimiter::Semicolon => "semicolon",
        };
        f.write_str(name)
    }
}

impl FromStr for Delimiter {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," => return Ok(Delimiter::Comma),
            ";" => return Ok(Delimiter::Semicolon),
            " " => return Ok(Delimiter::Space),
            "\n" | "\\n" => return Ok(Delimiter::Newline),
            _ => {}
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "comma" => Ok(Delimiter::Comma),
            "space" => Ok(Delimiter::Space),
            "newline" | "line" => Ok(Delimiter::Newline),
            "semicolon" => Ok(Delimiter::Semicolon),
            _ => Err(NumericError::UnknownDelimiter(s.to_string())),
        }
    }
}

/// Parse the leading number of a token, the way a lenient float parser does.
///
/// `"12px"` yields 12; tokens without a leading literal and non-finite
/// values yield `None`.
fn parse_token(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let literal = LEADING_NUMBER.find(token)?.as_str();
    literal.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Ordered finite numbers extracted from free text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    values: Vec<f64>,
}

impl SampleSet {
    /// Parse `text` with `delimiter`, silently dropping unparseable tokens.
    pub fn parse(text: &str, delimiter: Delimiter) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }

        let values = delimiter
            .tokenize(text)
            .into_iter()
            .filter_map(parse_token)
            .collect();

        Self { values }
    }

    /// Values in input order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of parsed values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no token parsed as a number.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Summarise the sample, or `None` when it is empty.
    pub fn statistics(&self) -> Option<StatisticsResult> {
        StatisticsResult::from_values(&self.values)
    }
}

/// Most frequent value(s) of a sample.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "status", content = "values", rename_all = "snake_case")]
pub enum Mode {
    /// Every value occurs exactly once.
    NoMode,
    /// Values sharing the highest frequency (at least 2), ascending.
    Values(Vec<f64>),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::NoMode => f.write_str("No mode"),
            Mode::Values(values) => {
                let joined: Vec<String> = values.iter().map(|v| format_display(*v)).collect();
                f.write_str(&joined.join(", "))
            }
        }
    }
}

/// Summary of a non-empty sample.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct StatisticsResult {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub mode: Mode,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    /// Population variance (divisor N).
    pub variance: f64,
    /// Population standard deviation.
    pub std_dev_population: f64,
    /// Sample standard deviation (divisor N-1); 0 for fewer than two values.
    pub std_dev_sample: f64,
}

impl StatisticsResult {
    /// Compute the summary for `values`; `None` when empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let n = count as f64;
        let sum = kahan_sum(&sorted);
        let mean = sum / n;

        let mid = count / 2;
        let median = if count % 2 == 1 {
            sorted[mid]
        } else {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        };

        let min = sorted[0];
        let max = sorted[count - 1];

        // Two-pass: deviations from the already known mean
        let squared_deviations = kahan_sum(
            &sorted
                .iter()
                .map(|v| (v - mean) * (v - mean))
                .collect::<Vec<_>>(),
        );
        let variance = squared_deviations / n;
        let std_dev_sample = if count > 1 {
            (squared_deviations / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        Some(Self {
            count,
            sum,
            mean,
            median,
            mode: mode_of_sorted(&sorted),
            min,
            max,
            range: max - min,
            variance,
            std_dev_population: variance.sqrt(),
            std_dev_sample,
        })
    }

    /// Whether every statistic is a finite number.
    ///
    /// Finite samples can still overflow, e.g. a sum of values near `f64::MAX`.
    pub fn is_finite(&self) -> bool {
        [
            self.sum,
            self.mean,
            self.median,
            self.range,
            self.variance,
            self.std_dev_population,
            self.std_dev_sample,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Split and parse sample text.
pub fn parse_samples(text: &str, delimiter: Delimiter) -> SampleSet {
    SampleSet::parse(text, delimiter)
}

/// Compute statistics for raw text, or `None` when no number was found.
pub fn compute_statistics(text: &str, delimiter: Delimiter) -> Option<StatisticsResult> {
    parse_samples(text, delimiter).statistics()
}

/// Recompute after the sample text or delimiter changed.
pub fn on_sample_text_changed(text: &str, delimiter: Delimiter) -> Option<StatisticsResult> {
    compute_statistics(text, delimiter)
}

/// Compensated summation.
fn kahan_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &v in values {
        let y = v - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

fn mode_of_sorted(sorted: &[f64]) -> Mode {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &v in sorted {
        match runs.last_mut() {
            Some((value, count)) if *value == v => *count += 1,
            _ => runs.push((v, 1)),
        }
    }

    let max_freq = runs.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if max_freq < 2 {
        return Mode::NoMode;
    }

    Mode::Values(
        runs.into_iter()
            .filter(|(_, c)| *c == max_freq)
            .map(|(v, _)| v)
            .collect(),
    )
}

/// Format a statistic with at most four decimals.
pub fn format_display(value: f64) -> String {
    super::units::format_display(value, 4)
}
