//! Numeral base explanation prompt.

use std::collections::HashMap;

use rmcp::model::PromptArgument;

use super::{PromptDefinition, argument, required};
use crate::domains::numeric::{Base, convert_base};
use crate::domains::prompts::error::PromptError;

pub struct ExplainNumberPrompt;

impl PromptDefinition for ExplainNumberPrompt {
    const NAME: &'static str = "explain_number";
    const DESCRIPTION: &'static str =
        "Explain how a number is written in binary, octal, decimal and hexadecimal";

    fn template() -> &'static str {
        r#"The {{base}} number {{value}} has these representations:

- binary: {{bin}}
- octal: {{oct}}
- decimal: {{dec}}
- hexadecimal: {{hex}}

Explain positional notation using this number: expand {{value}} as a sum of
powers of {{radix}}, then show how repeated division produces the other
representations.{{#if long}} The number is large, so summarize the pattern instead of writing every step.{{/if}}"#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            argument("value", "Digits of a non-negative integer", true),
            argument("base", "bin, oct, dec (default) or hex", false),
        ]
    }

    fn prepare(arguments: &mut HashMap<String, String>) -> Result<(), PromptError> {
        let base = match arguments.get("base").filter(|b| !b.is_empty()) {
            Some(b) => b
                .parse::<Base>()
                .map_err(|e| PromptError::invalid_argument("base", e.to_string()))?,
            None => Base::Dec,
        };

        let value = required(arguments, "value")?.trim().to_string();
        if value.is_empty() {
            return Err(PromptError::invalid_argument("value", "empty value"));
        }
        let fields = convert_base(&value, base)
            .map_err(|e| PromptError::invalid_argument("value", e.to_string()))?;

        if fields.bin.len() > 32 {
            arguments.insert("long".to_string(), "yes".to_string());
        }
        arguments.insert("base".to_string(), base.to_string());
        arguments.insert("radix".to_string(), base.radix().to_string());
        arguments.insert("value".to_string(), value);
        arguments.insert("bin".to_string(), fields.bin);
        arguments.insert("oct".to_string(), fields.oct);
        arguments.insert("dec".to_string(), fields.dec);
        arguments.insert("hex".to_string(), fields.hex);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_default_decimal() {
        let mut a = HashMap::from([("value".to_string(), "255".to_string())]);
        ExplainNumberPrompt::prepare(&mut a).unwrap();
        assert_eq!(a["bin"], "11111111");
        assert_eq!(a["hex"], "FF");
        assert_eq!(a["radix"], "10");
        assert!(!a.contains_key("long"));
    }

    #[test]
    fn test_prepare_hex_input() {
        let mut a = HashMap::from([
            ("value".to_string(), "ff".to_string()),
            ("base".to_string(), "hex".to_string()),
        ]);
        ExplainNumberPrompt::prepare(&mut a).unwrap();
        assert_eq!(a["dec"], "255");
        assert_eq!(a["radix"], "16");
    }

    #[test]
    fn test_prepare_invalid_digit() {
        let mut a = HashMap::from([
            ("value".to_string(), "102".to_string()),
            ("base".to_string(), "bin".to_string()),
        ]);
        let err = ExplainNumberPrompt::prepare(&mut a).unwrap_err();
        assert!(err.to_string().contains("'2'"));
    }
}
