//! Prompt definitions.
//!
//! Each prompt lives in its own file and implements [`PromptDefinition`].
//! Prompts may compute values with the numeric converters in `prepare`, so
//! the rendered text already carries the correct figures.

mod analyze_dataset;
mod explain_conversion;
mod explain_number;

use std::collections::HashMap;

use rmcp::model::PromptArgument;

pub use analyze_dataset::AnalyzeDatasetPrompt;
pub use explain_conversion::ExplainConversionPrompt;
pub use explain_number::ExplainNumberPrompt;

use super::error::PromptError;

/// Trait for prompt definitions.
pub trait PromptDefinition {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// The template string with {{variable}} placeholders.
    fn template() -> &'static str;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument>;

    /// Add derived variables to `arguments` before rendering.
    fn prepare(_arguments: &mut HashMap<String, String>) -> Result<(), PromptError> {
        Ok(())
    }
}

fn argument(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(required),
    }
}

/// Required argument, already checked by the service.
fn required<'a>(arguments: &'a HashMap<String, String>, name: &str) -> Result<&'a str, PromptError> {
    arguments
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| PromptError::missing_argument(name))
}
