//! Protocol result types.
//!
//! The structured shapes handed back to the transport layer. Success and
//! failure both travel as a [`ToolResult`]; failures carry a message only,
//! never provider-internal detail.

use serde::{Deserialize, Serialize};

/// Content item returned by a tool or resource read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
    /// Reference to an addressable resource.
    Resource {
        /// Canonical resource URI.
        uri: String,
        /// Inline content, when available.
        text: Option<String>,
    },
}

/// Result of a tool call or resource read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Content items.
    pub content: Vec<ToolContent>,
    /// Whether this result is a failure.
    pub is_error: bool,
}

impl ToolResult {
    /// A successful text result.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: false,
        }
    }

    /// A successful result listing multiple lines of text.
    #[must_use]
    pub fn lines(lines: &[String]) -> Self {
        Self::text(lines.join("\n"))
    }

    /// A failure result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// All text content joined with newlines.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                ToolContent::Text { text } => Some(text.as_str()),
                ToolContent::Resource { text, .. } => text.as_deref(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Advertised tool metadata, as returned by a list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
}

/// Advertised resource metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
    /// Scheme name, e.g. `direct`.
    pub scheme: String,
    /// Human-readable description.
    pub description: String,
}
