//! Prompt Registry - central registration of all prompts.
//!
//! When adding a new prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_prompts()` and `prompt_names()`

use super::definitions::{
    AnalyzeDatasetPrompt, ExplainConversionPrompt, ExplainNumberPrompt, PromptDefinition,
};
use super::templates::PromptTemplate;

fn build_template<P: PromptDefinition>() -> PromptTemplate {
    PromptTemplate {
        name: P::NAME.to_string(),
        description: Some(P::DESCRIPTION.to_string()),
        arguments: P::arguments(),
        template: P::template().to_string(),
        prepare: Some(P::prepare),
    }
}

/// Get all registered prompts as PromptTemplates.
pub fn get_all_prompts() -> Vec<PromptTemplate> {
    vec![
        build_template::<AnalyzeDatasetPrompt>(),
        build_template::<ExplainConversionPrompt>(),
        build_template::<ExplainNumberPrompt>(),
    ]
}

/// Get the list of all prompt names.
pub fn prompt_names() -> Vec<&'static str> {
    vec![
        AnalyzeDatasetPrompt::NAME,
        ExplainConversionPrompt::NAME,
        ExplainNumberPrompt::NAME,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_prompts() {
        let prompts = get_all_prompts();
        let names: Vec<_> = prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, prompt_names());
    }

    #[test]
    fn test_templates_parse() {
        for prompt in get_all_prompts() {
            assert!(prompt.validate().is_ok(), "{} has a malformed template", prompt.name);
        }
    }
}
