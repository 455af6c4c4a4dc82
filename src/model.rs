//! Domain types flowing through the resolution pipeline.

use serde::{Deserialize, Serialize};

/// Line written for a link that has no matching note.
pub const NO_MATCH_MARKER: &str = "no match";

/// A raw URL taken verbatim from the input document.
pub type ExtractedLink = String;

/// Username and host pair identifying a remote account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHandle {
    /// First path segment of the link, without the leading `@`.
    pub username: String,
    /// Network authority of the link (`host[:port]`).
    pub host: String,
}

/// An account as known to the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccount {
    /// Instance-internal account identifier.
    pub id: String,
    /// Number of notes the instance reported for the account.
    pub notes_count: u64,
}

/// One note from an account's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Instance-internal note identifier.
    pub id: String,
    /// URL of the note on its origin server; empty for notes without one.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of correlating one extracted link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationResult {
    /// The link as extracted from the document.
    pub original_link: ExtractedLink,
    /// Canonical note URL on the instance, when a note matched.
    pub canonical_url: Option<String>,
}

impl CorrelationResult {
    /// Whether a note matched the link.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.canonical_url.is_some()
    }

    /// Renders the output line: `<canonical> = <link>` or the no-match marker.
    #[must_use]
    pub fn to_line(&self) -> String {
        match &self.canonical_url {
            Some(canonical) => format!("{canonical} = {}", self.original_link),
            None => NO_MATCH_MARKER.to_string(),
        }
    }
}

/// Joins results into the newline-separated output document.
#[must_use]
pub fn render_output(results: &[CorrelationResult]) -> String {
    results.iter().map(CorrelationResult::to_line).collect::<Vec<_>>().join("\n")
}
