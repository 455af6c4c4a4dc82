//! Link extraction from the input document and account-handle parsing.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{PipelineError, Result};
use crate::model::{AccountHandle, ExtractedLink};

// The trailing word boundary drops punctuation that follows a link in prose.
static RE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)<?(https?://[^\s<>]+)>?\b").expect("link pattern is valid")
});

/// Extract every `http(s)://` link from `document`, in order, duplicates kept.
///
/// Angle brackets around a link are not part of it.
#[must_use]
pub fn extract_links(document: &str) -> Vec<ExtractedLink> {
    RE_LINK
        .captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

impl AccountHandle {
    /// Derive the posting account from a link of the form
    /// `https://host/@username/...`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::LinkParse`] when the link is not a URL, has
    /// no host, or has an empty first path segment.
    pub fn from_link(link: &str) -> Result<Self> {
        let fail = |reason: &str| PipelineError::LinkParse {
            link: link.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(link).map_err(|e| fail(&e.to_string()))?;
        let host = url.host_str().ok_or_else(|| fail("link has no host"))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let first_segment = url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .unwrap_or_default();
        let username = first_segment.strip_prefix('@').unwrap_or(first_segment);
        if username.is_empty() {
            return Err(fail("link path has no account segment"));
        }

        Ok(Self { username: username.to_string(), host })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_and_bracketed_links_in_order() {
        let doc = "First <https://a.example/@bob/123> then\nhttps://b.example/notes/xyz.";
        assert_eq!(
            extract_links(doc),
            vec!["https://a.example/@bob/123", "https://b.example/notes/xyz"]
        );
    }

    #[test]
    fn keeps_duplicates_and_query_strings() {
        let doc = "https://a.example/@bob/1?x=1 https://a.example/@bob/1?x=1";
        assert_eq!(extract_links(doc).len(), 2);
        assert_eq!(extract_links(doc)[0], "https://a.example/@bob/1?x=1");
    }

    #[test]
    fn trims_trailing_punctuation_and_ignores_other_schemes() {
        let doc = "(see https://a.example/@bob/1), ftp://a.example/x HTTPS://A.EXAMPLE/@bob/2";
        assert_eq!(extract_links(doc), vec!["https://a.example/@bob/1"]);
    }

    #[test]
    fn empty_document_yields_nothing() {
        assert!(extract_links("no links here").is_empty());
    }

    #[test]
    fn handle_strips_sigil_and_keeps_port() {
        let handle = AccountHandle::from_link("https://a.example:8443/@bob/statuses/1").unwrap();
        assert_eq!(handle, AccountHandle { username: "bob".into(), host: "a.example:8443".into() });

        let handle = AccountHandle::from_link("https://b.example/users/carol").unwrap();
        assert_eq!(handle.username, "users");
        assert_eq!(handle.host, "b.example");
    }

    #[test]
    fn handle_requires_an_account_segment() {
        for link in ["https://a.example", "https://a.example/", "https://a.example/@/1", "nope"] {
            let err = AccountHandle::from_link(link).unwrap_err();
            assert!(matches!(err, PipelineError::LinkParse { .. }), "{link}: {err}");
        }
    }
}
