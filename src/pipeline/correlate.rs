//! Matching an extracted link against an account's notes.

use tracing::debug;

use crate::model::{CorrelationResult, Post};

/// Find the first note whose stored `url` contains `link` as a substring.
///
/// The containment runs one way only: a stored url with extra trailing
/// query parameters still matches, but a stored url shorter than the link
/// never does. On a match the canonical url is `note_prefix` followed by the
/// note id; later matches are ignored.
#[must_use]
pub fn correlate(link: &str, posts: &[Post], note_prefix: &str) -> CorrelationResult {
    let canonical_url = posts
        .iter()
        .find(|post| post.url.contains(link))
        .map(|post| format!("{note_prefix}{}", post.id));

    match &canonical_url {
        Some(url) => debug!(%link, canonical = %url, "link matched note"),
        None => debug!(%link, scanned = posts.len(), "no note matched link"),
    }

    CorrelationResult { original_link: link.to_string(), canonical_url }
}
