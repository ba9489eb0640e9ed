//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! It maintains a registry of available resources and handles read requests.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use std::collections::BTreeMap;
use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use tracing::{debug, info, instrument, warn};

use super::definitions::{
    CatalogResource, DynamicResourceProvider, PreferencesResource, ServerInfoResource,
    UnitCategoryTemplate, UnitsResource,
};
use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::core::config::Config;
use crate::core::settings::Preferences;

/// State dynamic resources are computed from.
#[derive(Clone)]
pub struct ResourceContext {
    pub config: Arc<Config>,
    pub preferences: Preferences,
}

/// Service for managing and accessing resources.
pub struct ResourceService {
    context: ResourceContext,

    /// Registered resources keyed by URI.
    resources: BTreeMap<String, ResourceEntry>,

    /// Resource templates for parameterized resources.
    templates: Vec<ResourceTemplate>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(&'static str),

    /// Content computed on every read.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicResourceType {
    ServerInfo,
    Catalog,
    Units,
    Preferences,
}

impl ResourceService {
    /// Create a new ResourceService reading from `config` and `preferences`.
    pub fn new(config: Arc<Config>, preferences: Preferences) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            context: ResourceContext {
                config,
                preferences,
            },
            resources: BTreeMap::new(),
            templates: get_all_resource_templates(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources, ordered by URI.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI, falling back to the URI templates.
    #[instrument(skip(self))]
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let content = match self.resources.get(uri) {
            Some(entry) => match &entry.content {
                ResourceContent::Text(text) => ResourceContents::TextResourceContents {
                    uri: uri.to_string(),
                    mime_type: entry.resource.raw.mime_type.clone(),
                    text: (*text).to_string(),
                    meta: None,
                },
                ResourceContent::Dynamic(kind) => self.resolve_dynamic_content(uri, *kind)?,
            },
            None if UnitCategoryTemplate::matches(uri) => UnitCategoryTemplate::resolve(uri)?,
            None => {
                warn!("Unknown resource requested: {}", uri);
                return Err(ResourceError::not_found(uri));
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    fn resolve_dynamic_content(
        &self,
        uri: &str,
        kind: DynamicResourceType,
    ) -> Result<ResourceContents, ResourceError> {
        match kind {
            DynamicResourceType::ServerInfo => ServerInfoResource::resolve(uri, &self.context),
            DynamicResourceType::Catalog => CatalogResource::resolve(uri, &self.context),
            DynamicResourceType::Units => UnitsResource::resolve(uri, &self.context),
            DynamicResourceType::Preferences => PreferencesResource::resolve(uri, &self.context),
        }
    }
}
