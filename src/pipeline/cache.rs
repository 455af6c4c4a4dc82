//! Run-scoped memo of fetched note histories.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::model::{Post, ResolvedAccount};
use crate::pipeline::fetcher::PostFetcher;

/// Note histories fetched during this run, keyed by account id.
///
/// Lives for one run only; entries are never evicted or persisted.
#[derive(Debug, Default)]
pub struct RunCache {
    posts: HashMap<String, Vec<Post>>,
    fetches: usize,
}

impl RunCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `account`'s notes, fetching them on the first request only.
    ///
    /// # Errors
    ///
    /// Propagates the fetcher's error; nothing is cached for a failed fetch.
    pub async fn get_or_fetch(
        &mut self,
        account: &ResolvedAccount,
        fetcher: &PostFetcher<'_>,
    ) -> Result<&[Post]> {
        if self.posts.contains_key(&account.id) {
            debug!(account_id = %account.id, "note cache hit");
        } else {
            debug!(account_id = %account.id, "note cache miss");
            let posts = fetcher.fetch_all(account).await?;
            self.fetches += 1;
            self.posts.insert(account.id.clone(), posts);
        }
        Ok(self.posts.get(&account.id).map(Vec::as_slice).unwrap_or_default())
    }

    /// Number of fetch sequences run so far.
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    /// Whether `account_id`'s notes are already cached.
    #[must_use]
    pub fn contains(&self, account_id: &str) -> bool {
        self.posts.contains_key(account_id)
    }
}
