//! Error types for mapsource generation.

use thiserror::Error;

use crate::style::TOKEN_MARKER;

const REDACTED: &str = "<redacted>";

/// Errors that can occur while decomposing style URLs or rewriting a template.
#[derive(Debug, Error)]
pub enum MapsourceError {
    /// Style URL does not have the Atlas shape.
    #[error("Malformed style URL{}: {reason} ({url})", index_suffix(.index))]
    MalformedUrl {
        index: Option<usize>,
        url: String,
        reason: &'static str,
    },

    /// Style and display-name lists differ in length, or are empty.
    #[error("Expected one display name per style URL, got {styles} styles and {names} names")]
    InputCardinality { styles: usize, names: usize },

    /// Template is missing a subtree the transformer rewrites.
    #[error("Template is missing required node: {path}")]
    TemplateShape { path: &'static str },

    /// XML parsing or serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn index_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" #{i}")).unwrap_or_default()
}

impl MapsourceError {
    /// Create a malformed URL error with no batch position.
    ///
    /// Access token values in `url` are redacted before it is stored.
    pub fn malformed_url(url: &str, reason: &'static str) -> Self {
        Self::MalformedUrl {
            index: None,
            url: redact_tokens(url),
            reason,
        }
    }

    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a missing subtree error.
    pub fn template_shape(path: &'static str) -> Self {
        Self::TemplateShape { path }
    }

    /// Attach the position of the failing URL within a batch.
    ///
    /// Other variants are returned unchanged.
    pub fn at_index(self, position: usize) -> Self {
        match self {
            Self::MalformedUrl { url, reason, .. } => Self::MalformedUrl {
                index: Some(position),
                url,
                reason,
            },
            other => other,
        }
    }
}

/// Replace every `access_token=` value in `url` with a placeholder.
fn redact_tokens(url: &str) -> String {
    let mut redacted = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(at) = rest.find(TOKEN_MARKER) {
        let value_start = at + TOKEN_MARKER.len();
        redacted.push_str(&rest[..value_start]);
        let value_len = rest[value_start..]
            .find(['&', '#'])
            .unwrap_or(rest.len() - value_start);
        if value_len > 0 {
            redacted.push_str(REDACTED);
        }
        rest = &rest[value_start + value_len..];
    }
    redacted.push_str(rest);
    redacted
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MapsourceError>;
