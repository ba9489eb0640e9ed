//! Prompt service implementation.
//!
//! The PromptService keeps the registered templates, checks arguments and
//! renders the final user message.

use std::collections::{BTreeMap, HashMap};

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use tracing::{debug, info, instrument, warn};

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Service for managing and instantiating prompts.
pub struct PromptService {
    /// Registered prompts keyed by name.
    prompts: BTreeMap<String, PromptTemplate>,
}

impl PromptService {
    /// Create a PromptService holding every registered prompt.
    pub fn new() -> Self {
        info!("Initializing PromptService");

        let mut service = Self {
            prompts: BTreeMap::new(),
        };
        for template in get_all_prompts() {
            service.register_prompt(template);
        }
        service
    }

    /// Register a prompt template.
    pub fn register_prompt(&mut self, template: PromptTemplate) {
        debug!("Registering prompt: {}", template.name);
        self.prompts.insert(template.name.clone(), template);
    }

    /// List all available prompts, ordered by name.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Render a prompt with its arguments.
    ///
    /// Required arguments must be present and non-blank.
    #[instrument(skip(self, arguments))]
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self.prompts.get(name).ok_or_else(|| {
            warn!("Unknown prompt requested: {}", name);
            PromptError::not_found(name)
        })?;

        let mut arguments = arguments.unwrap_or_default();

        for arg in &template.arguments {
            let present = arguments
                .get(&arg.name)
                .is_some_and(|v| !v.trim().is_empty());
            if arg.required.unwrap_or(false) && !present {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        if let Some(prepare) = template.prepare {
            prepare(&mut arguments)?;
        }

        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}
