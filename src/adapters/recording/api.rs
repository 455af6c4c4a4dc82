//! Recording adapter for the `RemoteApi` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ApiFuture, RemoteApi};

/// Records API interactions while delegating to an inner implementation.
pub struct RecordingApiClient {
    inner: Box<dyn RemoteApi>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingApiClient {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn RemoteApi>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PostInput<'a> {
    endpoint: &'a str,
    body: &'a serde_json::Value,
}

impl RemoteApi for RecordingApiClient {
    fn post_json(&self, endpoint: &str, body: serde_json::Value) -> ApiFuture<'_> {
        let endpoint = endpoint.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.post_json(&endpoint, body.clone()).await;
            let input = PostInput { endpoint: &endpoint, body: &body };
            record_result(&recorder, "api", "post_json", &input, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::api::ReplayingApiClient;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::cassette::replayer::CassetteReplayer;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn records_request_and_response() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            instance: "https://example.social".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "api".into(),
                method: "post_json".into(),
                input: json!({}),
                output: json!({"Ok": {"id": "9abc", "notesCount": 3}}),
            }],
        };
        let inner = ReplayingApiClient::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))));
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            "unused.cassette.yaml",
            "test",
            "https://example.social",
        )));

        let api = RecordingApiClient::new(Box::new(inner), Arc::clone(&recorder));
        let body = json!({"username": "alice", "host": "example.social"});
        let response = api.post_json("users/show", body.clone()).await.unwrap();
        assert_eq!(response["id"], "9abc");

        let guard = recorder.lock().unwrap();
        let recorded = guard.interactions();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].input, json!({"endpoint": "users/show", "body": body}));
        assert_eq!(recorded[0].output, json!({"Ok": {"id": "9abc", "notesCount": 3}}));
    }
}
