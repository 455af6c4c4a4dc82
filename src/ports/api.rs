//! Remote API port for the instance's JSON-over-POST endpoints.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`RemoteApi`] to keep the trait dyn-compatible.
pub type ApiFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Endpoint that maps a username and host to an account record.
pub const USERS_SHOW: &str = "users/show";

/// Endpoint that lists an account's notes, newest first.
pub const USERS_NOTES: &str = "users/notes";

/// Sends JSON requests to the remote instance.
pub trait RemoteApi: Send + Sync {
    /// POSTs `body` to `endpoint` (relative to the instance's `/api/` root)
    /// and returns the decoded JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the response is not JSON.
    fn post_json(&self, endpoint: &str, body: serde_json::Value) -> ApiFuture<'_>;
}
