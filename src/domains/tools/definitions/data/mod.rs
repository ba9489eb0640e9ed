//! Numeric data tools: base conversion, unit conversion, statistics.

pub mod base;
pub mod stats;
pub mod units;

pub use base::BaseConvertTool;
pub use stats::StatisticsTool;
pub use units::{UnitCategoriesTool, UnitConvertTool};
