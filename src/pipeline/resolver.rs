//! Account resolution: `(username, host)` to instance account id and note count.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PipelineError, PortError, Result};
use crate::model::{AccountHandle, ResolvedAccount};
use crate::ports::api::{RemoteApi, USERS_SHOW};

#[derive(Serialize)]
struct ShowUserRequest<'a> {
    username: &'a str,
    host: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: String,
    notes_count: u64,
}

/// Resolves account handles with one `users/show` call each. No retries.
pub struct AccountResolver<'a> {
    api: &'a dyn RemoteApi,
}

impl<'a> AccountResolver<'a> {
    /// Creates a resolver over the given API.
    #[must_use]
    pub fn new(api: &'a dyn RemoteApi) -> Self {
        Self { api }
    }

    /// Look up `handle` on the instance.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Resolution`] if the request fails or the
    /// response lacks a string `id` or a non-negative integer `notesCount`.
    pub async fn resolve(&self, handle: &AccountHandle) -> Result<ResolvedAccount> {
        let fail = |source: PortError| PipelineError::Resolution {
            username: handle.username.clone(),
            host: handle.host.clone(),
            source,
        };

        let request = ShowUserRequest { username: &handle.username, host: &handle.host };
        let body = serde_json::to_value(&request).map_err(|e| fail(e.into()))?;
        let response = self.api.post_json(USERS_SHOW, body).await.map_err(fail)?;
        let record: UserRecord = serde_json::from_value(response).map_err(|e| fail(e.into()))?;

        info!(
            username = %handle.username,
            host = %handle.host,
            account_id = %record.id,
            notes_count = record.notes_count,
            "resolved account"
        );
        Ok(ResolvedAccount { id: record.id, notes_count: record.notes_count })
    }
}
