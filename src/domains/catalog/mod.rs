//! Catalog domain: the navigable list of developer tools.
//!
//! The catalog groups tools into categories and records, for each entry, the
//! MCP tool (if any) that implements it. It backs the `catalog_search` tool
//! and the `devtools://catalog` resource.

use schemars::JsonSchema;
use serde::Serialize;

/// Number of matches returned when no limit is given.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// A single tool in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CatalogEntry {
    /// URL-style slug, stable across releases.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Name of the MCP tool implementing this entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp_tool: Option<&'static str>,
}

/// A group of related tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CatalogCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub children: &'static [CatalogEntry],
}

const fn entry(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    mcp_tool: Option<&'static str>,
) -> CatalogEntry {
    CatalogEntry {
        id,
        name,
        description,
        mcp_tool,
    }
}

const TEXT: &[CatalogEntry] = &[
    entry("markdown-editor", "Markdown Editor", "A complete markdown editor with tools", None),
    entry(
        "text-case-converter",
        "Text Case Converter",
        "Convert text to various cases like camelCase, snake_case",
        Some("text_case"),
    ),
    entry(
        "json-formatter",
        "JSON Formatter and Validator",
        "Format and validate JSON for readability",
        Some("json_format"),
    ),
    entry(
        "text-encoder-decoder",
        "Text Encoder/Decoder",
        "Encode or decode Base64, URL, HTML entities",
        Some("text_codec"),
    ),
    entry(
        "uuid-generator",
        "UUID Generator",
        "Generate universally unique identifiers",
        Some("uuid_generate"),
    ),
    entry(
        "regex-tester",
        "Regex Tester",
        "Test and debug regular expressions",
        Some("regex_test"),
    ),
];

const CODE: &[CatalogEntry] = &[
    entry("code-minifier", "Code Minifier", "Minify CSS, JavaScript, and HTML files", None),
    entry(
        "code-beautifier",
        "Code Beautifier/Prettifier",
        "Prettify code for multiple languages",
        None,
    ),
    entry(
        "hash-generator",
        "Hash Generator",
        "Generate SHA-1, SHA-256, SHA-384, SHA-512 hashes",
        Some("hash_text"),
    ),
    entry(
        "jwt-decoder",
        "JWT Decoder",
        "Decode and analyze JSON Web Tokens",
        Some("jwt_decode"),
    ),
    entry(
        "code-diff-checker",
        "Code Diff Checker",
        "Highlight changes between code files",
        None,
    ),
];

const IMAGE: &[CatalogEntry] = &[
    entry("image-optimizer", "Image Optimizer", "Compress and optimize images for web use", None),
    entry(
        "image-resizer",
        "Image Resizer and Cropper",
        "Resize or crop images to specific dimensions",
        None,
    ),
    entry("icon-generator", "Icon Generator", "Convert images to various icon formats", None),
    entry("color-picker", "Color Picker", "Select colors and get HEX/RGB values", None),
    entry(
        "color-palette",
        "Color Palette Generator",
        "Generate color palettes from an image",
        None,
    ),
];

const PRODUCTIVITY: &[CatalogEntry] = &[
    entry(
        "random-data",
        "Random Data Generator",
        "Generate random data for testing, like names, emails, addresses",
        None,
    ),
    entry(
        "csv-converter",
        "CSV to JSON/Excel Converter",
        "Convert CSV files to JSON or Excel format",
        None,
    ),
    entry(
        "lorem-ipsum",
        "Lorem Ipsum Generator",
        "Generate placeholder text",
        Some("lorem_ipsum"),
    ),
    entry(
        "dependency-checker",
        "Dependency Version Checker",
        "Check the latest versions of popular libraries",
        None,
    ),
    entry(
        "task-matrix",
        "Task Prioritization Matrix",
        "Sort tasks by urgency and importance",
        None,
    ),
    entry("timezone-converter", "Time Zone Converter", "Compare time zones easily", None),
    entry("countdown-timer", "Countdown Timer", "Set custom countdowns for tasks", None),
    entry("habit-tracker", "Habit Tracker", "Log daily activities or goals", None),
    entry("stopwatch", "Stopwatch", "Track time for tasks in real-time", None),
    entry(
        "calendar-scheduler",
        "Calendar Events Scheduler",
        "Plan and set reminders for events",
        None,
    ),
];

const DATA: &[CatalogEntry] = &[
    entry(
        "unit-converter",
        "Unit Converter",
        "Convert units of measure (length, weight, temperature, digital storage)",
        Some("unit_convert"),
    ),
    entry(
        "math-evaluator",
        "Math Expression Evaluator",
        "Calculate complex math expressions",
        None,
    ),
    entry(
        "base-converter",
        "Binary/Hexadecimal Converter",
        "Convert numbers between decimal, binary, octal, and hexadecimal",
        Some("base_convert"),
    ),
    entry(
        "statistical-calc",
        "Statistical Calculator",
        "Calculate mean, median, mode, and standard deviation",
        Some("statistics"),
    ),
];

const NETWORKING: &[CatalogEntry] = &[
    entry("rest-client", "REST Client", "Test API endpoints by sending HTTP requests", None),
    entry("http-headers", "HTTP Headers Checker", "Check HTTP headers for troubleshooting", None),
    entry("ip-lookup", "IP Address Lookup", "Find details about IP addresses", None),
    entry("port-scanner", "Port Scanner", "Check open ports for diagnostics", None),
    entry("dns-lookup", "DNS Lookup", "Check DNS records for a domain", None),
    entry("ping-tool", "Ping Tool", "Test connectivity to servers or websites", None),
];

const SECURITY: &[CatalogEntry] = &[
    entry(
        "password-generator",
        "Password Generator",
        "Generate strong, random passwords",
        Some("password_generate"),
    ),
    entry(
        "encryption-tool",
        "Encryption/Decryption Tool",
        "Encrypt or decrypt text with a given key",
        None,
    ),
    entry(
        "ssl-checker",
        "SSL Certificate Checker",
        "Verify SSL certificate details for a domain",
        None,
    ),
    entry(
        "data-sanitizer",
        "Data Sanitizer",
        "Clean sensitive information from text or data files",
        Some("data_sanitize"),
    ),
];

/// The full catalog, in navigation order.
pub const CATALOG: &[CatalogCategory] = &[
    CatalogCategory { id: "text", name: "Text", children: TEXT },
    CatalogCategory { id: "code", name: "Code", children: CODE },
    CatalogCategory { id: "image", name: "Image", children: IMAGE },
    CatalogCategory { id: "productivity", name: "Productivity", children: PRODUCTIVITY },
    CatalogCategory { id: "data", name: "Data", children: DATA },
    CatalogCategory { id: "networking", name: "Networking", children: NETWORKING },
    CatalogCategory { id: "security", name: "Security", children: SECURITY },
];

/// Iterate every entry across categories.
pub fn entries() -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().flat_map(|c| c.children.iter())
}

/// Find an entry by id.
pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    entries().find(|e| e.id == id)
}

/// Category owning the entry with `id`.
pub fn category_of(id: &str) -> Option<&'static CatalogCategory> {
    CATALOG
        .iter()
        .find(|c| c.children.iter().any(|e| e.id == id))
}

/// Case-insensitive substring search over names and descriptions.
///
/// An empty query matches everything; results keep catalog order.
pub fn search(query: &str, limit: usize) -> Vec<&'static CatalogEntry> {
    let needle = query.to_lowercase();
    entries()
        .filter(|e| {
            e.name.to_lowercase().contains(&needle) || e.description.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = entries().map(|e| e.id).collect();
        assert_eq!(ids.len(), entries().count());
    }

    #[test]
    fn test_search_matches_description() {
        let hits = search("HASH", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "hash-generator");

        let hits = search("standard deviation", 10);
        assert_eq!(hits[0].id, "statistical-calc");
    }

    #[test]
    fn test_search_respects_limit() {
        assert_eq!(search("", DEFAULT_SEARCH_LIMIT).len(), DEFAULT_SEARCH_LIMIT);
        assert!(search("converter", 2).len() <= 2);
    }

    #[test]
    fn test_search_no_match() {
        assert!(search("quantum teleporter", 5).is_empty());
    }

    #[test]
    fn test_find_and_category() {
        let e = find("base-converter").unwrap();
        assert_eq!(e.mcp_tool, Some("base_convert"));
        assert_eq!(category_of("base-converter").unwrap().id, "data");
        assert!(find("nope").is_none());
    }
}
