//! Dataset analysis prompt.

use std::collections::HashMap;

use rmcp::model::PromptArgument;

use super::{PromptDefinition, argument, required};
use crate::domains::numeric::stats::format_display;
use crate::domains::numeric::{Delimiter, compute_statistics};
use crate::domains::prompts::error::PromptError;

/// Ask for an interpretation of a numeric sample, with its statistics precomputed.
pub struct AnalyzeDatasetPrompt;

impl PromptDefinition for AnalyzeDatasetPrompt {
    const NAME: &'static str = "analyze_dataset";
    const DESCRIPTION: &'static str =
        "Interpret a list of numbers using its computed descriptive statistics";

    fn template() -> &'static str {
        r#"Analyze the following dataset{{#if delimiter}} (split on {{delimiter}}){{/if}}.

Data:
{{data}}

Descriptive statistics (population variance):
{{statistics}}

Describe the central tendency and the spread, point out outliers or skew,
and suggest what further analysis would be useful."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument("data", "Numbers separated by the delimiter", true),
            argument(
                "delimiter",
                "comma (default), space, newline or semicolon",
                false,
            ),
        ]
    }

    fn prepare(arguments: &mut HashMap<String, String>) -> Result<(), PromptError> {
        let delimiter = match arguments.get("delimiter").filter(|d| !d.is_empty()) {
            Some(d) => d
                .parse::<Delimiter>()
                .map_err(|e| PromptError::invalid_argument("delimiter", e.to_string()))?,
            None => Delimiter::default(),
        };

        let stats = compute_statistics(required(arguments, "data")?, delimiter)
            .ok_or_else(|| PromptError::invalid_argument("data", "no numeric values found"))?;
        if !stats.is_finite() {
            return Err(PromptError::invalid_argument("data", "values overflow the f64 range"));
        }

        let lines = [
            ("Count", stats.count.to_string()),
            ("Sum", format_display(stats.sum)),
            ("Mean", format_display(stats.mean)),
            ("Median", format_display(stats.median)),
            ("Mode", stats.mode.to_string()),
            ("Min", format_display(stats.min)),
            ("Max", format_display(stats.max)),
            ("Range", format_display(stats.range)),
            ("Variance", format_display(stats.variance)),
            ("Std dev (population)", format_display(stats.std_dev_population)),
            ("Std dev (sample)", format_display(stats.std_dev_sample)),
        ];
        let statistics = lines
            .iter()
            .map(|(label, value)| format!("- {label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");

        arguments.insert("delimiter".to_string(), delimiter.to_string());
        arguments.insert("statistics".to_string(), statistics);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_prepare_adds_statistics() {
        let mut a = args(&[("data", "2, 4, 4, 4, 5, 5, 7, 9")]);
        AnalyzeDatasetPrompt::prepare(&mut a).unwrap();
        let stats = &a["statistics"];
        assert!(stats.contains("- Count: 8"));
        assert!(stats.contains("- Mean: 5"));
        assert!(stats.contains("- Std dev (population): 2"));
        assert_eq!(a["delimiter"], "comma");
    }

    #[test]
    fn test_prepare_semicolon_delimiter() {
        let mut a = args(&[("data", "1;2;3"), ("delimiter", "semicolon")]);
        AnalyzeDatasetPrompt::prepare(&mut a).unwrap();
        assert!(a["statistics"].contains("- Median: 2"));
    }

    #[test]
    fn test_prepare_rejects_bad_input() {
        let mut a = args(&[("data", "a, b")]);
        assert!(matches!(
            AnalyzeDatasetPrompt::prepare(&mut a),
            Err(PromptError::InvalidArgument(..))
        ));

        let mut a = args(&[("data", "1,2"), ("delimiter", "tab")]);
        assert!(AnalyzeDatasetPrompt::prepare(&mut a).is_err());

        let mut a = args(&[("data", "1e308, 1e308")]);
        assert!(matches!(
            AnalyzeDatasetPrompt::prepare(&mut a),
            Err(PromptError::InvalidArgument(arg, _)) if arg == "data"
        ));
    }
}
