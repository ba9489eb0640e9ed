//! Unit conversion explanation prompt.

use std::collections::HashMap;

use rmcp::model::PromptArgument;

use super::{PromptDefinition, argument, required};
use crate::domains::numeric::UnitCategory;
use crate::domains::numeric::units::{format_display, on_value_changed};
use crate::domains::prompts::error::PromptError;

pub struct ExplainConversionPrompt;

impl PromptDefinition for ExplainConversionPrompt {
    const NAME: &'static str = "explain_conversion";
    const DESCRIPTION: &'static str =
        "Explain step by step how a value is converted between two units";

    fn template() -> &'static str {
        r#"Explain how to convert {{value}} {{from}} to {{to}} ({{category}}).

The converter gives: {{value}} {{from}} = {{result}} {{to}}.

{{#if offset}}Temperature scales have different zero points: show both the offset and the scale factor, and convert through Celsius.{{else}}Show the conversion factor, where it comes from, and the arithmetic.{{/if}}
Finish with a quick way to estimate this conversion mentally."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument("value", "Number to convert", true),
            argument("from", "Source unit symbol, e.g. km", true),
            argument("to", "Target unit symbol, e.g. mi", true),
        ]
    }

    fn prepare(arguments: &mut HashMap<String, String>) -> Result<(), PromptError> {
        let raw = required(arguments, "value")?;
        let value: f64 = raw
            .trim()
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| PromptError::invalid_argument("value", format!("'{raw}' is not a number")))?;

        let from = required(arguments, "from")?.trim().to_lowercase();
        let to = required(arguments, "to")?.trim().to_lowercase();

        let category = UnitCategory::containing(&from)
            .ok_or_else(|| PromptError::invalid_argument("from", format!("unknown unit '{from}'")))?;
        let result = on_value_changed(value, &from, &to, category)
            .map_err(|e| PromptError::invalid_argument("to", e.to_string()))?;
        if !result.is_finite() {
            return Err(PromptError::invalid_argument("value", "the result overflows the f64 range"));
        }

        arguments.insert("category".to_string(), category.name().to_lowercase());
        arguments.insert("result".to_string(), format_display(result, 6));
        if category == UnitCategory::Temperature {
            arguments.insert("offset".to_string(), "yes".to_string());
        }
        arguments.insert("from".to_string(), from);
        arguments.insert("to".to_string(), to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared(value: &str, from: &str, to: &str) -> Result<HashMap<String, String>, PromptError> {
        let mut a = HashMap::from([
            ("value".to_string(), value.to_string()),
            ("from".to_string(), from.to_string()),
            ("to".to_string(), to.to_string()),
        ]);
        ExplainConversionPrompt::prepare(&mut a).map(|_| a)
    }

    #[test]
    fn test_prepare_length() {
        let a = prepared("5", "KM", "mi").unwrap();
        assert_eq!(a["category"], "length");
        assert_eq!(a["result"], "3.106855");
        assert_eq!(a["from"], "km");
        assert!(!a.contains_key("offset"));
    }

    #[test]
    fn test_prepare_temperature_sets_offset() {
        let a = prepared("100", "c", "f").unwrap();
        assert_eq!(a["result"], "212");
        assert_eq!(a["offset"], "yes");
    }

    #[test]
    fn test_prepare_errors() {
        assert!(matches!(
            prepared("abc", "m", "km"),
            Err(PromptError::InvalidArgument(arg, _)) if arg == "value"
        ));
        assert!(matches!(
            prepared("1", "furlong", "m"),
            Err(PromptError::InvalidArgument(arg, _)) if arg == "from"
        ));
        assert!(matches!(
            prepared("1", "kg", "m"),
            Err(PromptError::InvalidArgument(arg, _)) if arg == "to"
        ));
        assert!(matches!(
            prepared("1e308", "pb", "b"),
            Err(PromptError::InvalidArgument(arg, _)) if arg == "value"
        ));
    }
}
