//! Replaying adapter for the `RemoteApi` port.

use std::sync::{Arc, Mutex};

use super::{next_call, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{ApiFuture, RemoteApi};

/// Serves recorded API responses from a cassette, in recorded order.
///
/// Each response is served only to a request for the endpoint it was
/// recorded against; request bodies are not compared. Interactions recorded
/// without an endpoint are served to any request.
pub struct ReplayingApiClient {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingApiClient {
    /// Create a replaying API client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl RemoteApi for ReplayingApiClient {
    fn post_json(&self, endpoint: &str, _body: serde_json::Value) -> ApiFuture<'_> {
        let (recorded_endpoint, output) = next_call(&self.replayer, "api", "post_json");
        let result = match recorded_endpoint {
            Some(recorded) if recorded != endpoint => Err(format!(
                "Replay mismatch: cassette has a {recorded} response next, but {endpoint} was requested"
            )
            .into()),
            _ => replay_result::<serde_json::Value>(output),
        };
        Box::pin(std::future::ready(result))
    }
}
