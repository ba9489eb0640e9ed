//! Prompt templates.
//!
//! Templates use a small mustache-like syntax:
//! - `{{name}}` inserts an argument (empty when unset)
//! - `{{#if name}}..{{/if}}` keeps its body only when `name` is non-empty
//! - `{{#if name}}..{{else}}..{{/if}}` with an alternative branch
//!
//! Conditionals nest. Templates are parsed on every render, so malformed
//! tags surface as [`PromptError::TemplateError`].

use std::collections::HashMap;

use rmcp::model::PromptArgument;

use super::error::PromptError;

/// Hook that derives extra template variables from the caller's arguments.
pub type PrepareFn = fn(&mut HashMap<String, String>) -> Result<(), PromptError>;

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// Template source.
    pub template: String,

    /// Runs before rendering, after required arguments are checked.
    pub prepare: Option<PrepareFn>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var(String),
    If {
        var: String,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// Why a block stopped parsing.
#[derive(Debug, PartialEq)]
enum Stop {
    Eof,
    Else,
    EndIf,
}

impl PromptTemplate {
    /// Create a new prompt template without a prepare hook.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
            prepare: None,
        }
    }

    /// Check the template syntax without rendering.
    pub fn validate(&self) -> Result<(), PromptError> {
        parse(&self.template).map(|_| ())
    }

    /// Render the template with the given arguments.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let nodes = parse(&self.template)?;
        let mut out = String::with_capacity(self.template.len());
        render_nodes(&nodes, arguments, &mut out);
        Ok(out)
    }
}

fn parse(source: &str) -> Result<Vec<Node>, PromptError> {
    let mut rest = source;
    let (nodes, stop) = parse_block(&mut rest)?;
    match stop {
        Stop::Eof => Ok(nodes),
        Stop::Else => Err(PromptError::template("{{else}} outside of {{#if}}")),
        Stop::EndIf => Err(PromptError::template("{{/if}} without matching {{#if}}")),
    }
}

fn parse_block(rest: &mut &str) -> Result<(Vec<Node>, Stop), PromptError> {
    let mut nodes = Vec::new();

    loop {
        let Some(open) = rest.find("{{") else {
            if !rest.is_empty() {
                nodes.push(Node::Text(rest.to_string()));
            }
            *rest = "";
            return Ok((nodes, Stop::Eof));
        };

        if open > 0 {
            nodes.push(Node::Text(rest[..open].to_string()));
        }

        let after = &rest[open + 2..];
        let close = after
            .find("}}")
            .ok_or_else(|| PromptError::template("Unclosed '{{' tag"))?;
        let tag = after[..close].trim();
        *rest = &after[close + 2..];

        match tag {
            "else" => return Ok((nodes, Stop::Else)),
            "/if" => return Ok((nodes, Stop::EndIf)),
            _ if tag == "#if" || tag.starts_with("#if ") => {
                let var = tag["#if".len()..].trim();
                if var.is_empty() {
                    return Err(PromptError::template("{{#if}} needs a variable name"));
                }

                let (then, stop) = parse_block(rest)?;
                let otherwise = match stop {
                    Stop::EndIf => Vec::new(),
                    Stop::Else => match parse_block(rest)? {
                        (otherwise, Stop::EndIf) => otherwise,
                        (_, Stop::Else) => {
                            return Err(PromptError::template(format!(
                                "Second {{{{else}}}} in {{{{#if {var}}}}}"
                            )));
                        }
                        (_, Stop::Eof) => return Err(missing_end_if(var)),
                    },
                    Stop::Eof => return Err(missing_end_if(var)),
                };

                nodes.push(Node::If {
                    var: var.to_string(),
                    then,
                    otherwise,
                });
            }
            "" => return Err(PromptError::template("Empty '{{}}' tag")),
            var => nodes.push(Node::Var(var.to_string())),
        }
    }
}

fn missing_end_if(var: &str) -> PromptError {
    PromptError::template(format!("Missing {{{{/if}}}} for {{{{#if {var}}}}}"))
}

fn render_nodes(nodes: &[Node], arguments: &HashMap<String, String>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var(var) => {
                if let Some(value) = arguments.get(var) {
                    out.push_str(value);
                }
            }
            Node::If {
                var,
                then,
                otherwise,
            } => {
                let is_set = arguments.get(var).is_some_and(|v| !v.is_empty());
                render_nodes(if is_set { then } else { otherwise }, arguments, out);
            }
        }
    }
}
