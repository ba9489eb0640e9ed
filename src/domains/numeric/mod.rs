//! Numeric domain: the pure computations behind the data tools.
//!
//! - `base` - numeral base conversion (bin, oct, dec, hex), arbitrary precision
//! - `units` - category-scoped unit conversion (length, weight, temperature, data)
//! - `stats` - descriptive statistics over delimited number lists
//!
//! Everything here is synchronous and side-effect free. Tool definitions in
//! `domains/tools/definitions/data/` wrap these functions for MCP clients.

pub mod base;
mod error;
pub mod stats;
pub mod units;

pub use base::{Base, BaseConversion, BaseConverter, BaseRepresentations, convert_base};
pub use error::NumericError;
pub use stats::{Delimiter, Mode, SampleSet, StatisticsResult, compute_statistics, parse_samples};
pub use units::{CategoryDefaults, Unit, UnitCategory, convert};
