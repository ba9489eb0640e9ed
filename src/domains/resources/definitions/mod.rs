//! Resource definitions.
//!
//! One file per resource. Static resources return their text from
//! `content()`; dynamic ones also implement [`DynamicResourceProvider`]
//! and are resolved on every read.

mod catalog;
mod number_guide;
mod preferences;
mod server_info;
mod units;

use rmcp::model::ResourceContents;

pub use catalog::CatalogResource;
pub use number_guide::NumberGuideResource;
pub use preferences::PreferencesResource;
pub use server_info::ServerInfoResource;
pub use units::{UnitCategoryTemplate, UnitsResource};

use super::error::ResourceError;
use super::service::{ResourceContent, ResourceContext};

/// Metadata and content source of a resource.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}

/// Resources whose content is computed at read time.
pub trait DynamicResourceProvider {
    fn resolve(uri: &str, context: &ResourceContext) -> Result<ResourceContents, ResourceError>;
}

/// Pretty-print `value` as a text resource.
pub(crate) fn json_contents<T: serde::Serialize>(
    uri: &str,
    value: &T,
) -> Result<ResourceContents, ResourceError> {
    let text = serde_json::to_string_pretty(value)?;
    Ok(ResourceContents::TextResourceContents {
        uri: uri.to_string(),
        mime_type: Some("application/json".to_string()),
        text,
        meta: None,
    })
}
