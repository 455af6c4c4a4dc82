//! Paginated retrieval of an account's full note history.
//!
//! Pages hold at most [`PAGE_SIZE`] notes. The first page asks for
//! `min(total, PAGE_SIZE)` notes; every later page asks for the notes still
//! missing (`total - fetched`) with `sinceId` set to the last note appended.
//! The loop always runs `ceil(total / PAGE_SIZE)` times: short pages are
//! not detected, so an account can come back under-fetched.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::config::PAGE_SIZE;
use crate::error::{PipelineError, PortError, Result};
use crate::model::{Post, ResolvedAccount};
use crate::ports::api::{RemoteApi, USERS_NOTES};
use crate::ports::pacer::Pacer;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotesRequest<'a> {
    user_id: &'a str,
    limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    since_id: Option<&'a str>,
}

/// Number of page requests needed for `notes_count` notes.
#[must_use]
pub fn page_count(notes_count: u64) -> u64 {
    notes_count.div_ceil(PAGE_SIZE)
}

/// Fetches note history page by page, pausing before every request.
pub struct PostFetcher<'a> {
    api: &'a dyn RemoteApi,
    pacer: &'a dyn Pacer,
    delay: Duration,
}

impl<'a> PostFetcher<'a> {
    /// Creates a fetcher that waits `delay` before each page request.
    #[must_use]
    pub fn new(api: &'a dyn RemoteApi, pacer: &'a dyn Pacer, delay: Duration) -> Self {
        Self { api, pacer, delay }
    }

    /// Fetch all of `account`'s notes, newest first, in the order received.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Fetch`] carrying the notes gathered so far if
    /// a request fails, a page is not an array of `{id, url}` records, or a
    /// continuation page has no cursor because every earlier page was empty.
    pub async fn fetch_all(&self, account: &ResolvedAccount) -> Result<Vec<Post>> {
        let total = account.notes_count;
        let pages = page_count(total);
        let mut posts: Vec<Post> = Vec::new();

        for page in 0..pages {
            self.pacer.pause(self.delay).await;

            let body = match self.page_request(account, page, pages, &posts) {
                Ok(body) => body,
                Err(source) => return Err(fetch_failure(account, posts, source)),
            };
            debug!(account_id = %account.id, page, pages, request = %body, "requesting notes page");

            let response = match self.api.post_json(USERS_NOTES, body).await {
                Ok(response) => response,
                Err(source) => return Err(fetch_failure(account, posts, source)),
            };
            let received: Vec<Post> = match serde_json::from_value(response) {
                Ok(received) => received,
                Err(e) => return Err(fetch_failure(account, posts, e.into())),
            };

            debug!(account_id = %account.id, page, received = received.len(), "received notes page");
            posts.extend(received);
        }

        if u64::try_from(posts.len()) != Ok(total) {
            debug!(
                account_id = %account.id,
                expected = total,
                fetched = posts.len(),
                "fetched note count differs from reported total"
            );
        }
        Ok(posts)
    }

    fn page_request(
        &self,
        account: &ResolvedAccount,
        page: u64,
        pages: u64,
        fetched: &[Post],
    ) -> std::result::Result<serde_json::Value, PortError> {
        let request = if page == 0 {
            let limit = if pages == 1 { account.notes_count } else { PAGE_SIZE };
            NotesRequest { user_id: &account.id, limit, since_id: None }
        } else {
            let cursor = fetched.last().ok_or("no notes received yet to continue from")?;
            let fetched_count = u64::try_from(fetched.len()).unwrap_or(u64::MAX);
            NotesRequest {
                user_id: &account.id,
                limit: account.notes_count.saturating_sub(fetched_count),
                since_id: Some(&cursor.id),
            }
        };
        Ok(serde_json::to_value(&request)?)
    }
}

fn fetch_failure(account: &ResolvedAccount, partial: Vec<Post>, source: PortError) -> PipelineError {
    PipelineError::Fetch { account_id: account.id.clone(), partial, source }
}
