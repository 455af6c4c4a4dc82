//! Live adapter for the `RemoteApi` port using `reqwest`.

use reqwest::Client;
use url::Url;

use crate::ports::api::{ApiFuture, RemoteApi};

/// Live API client that POSTs JSON to `<instance>/api/<endpoint>`.
pub struct LiveApiClient {
    client: Client,
    instance: Url,
}

impl LiveApiClient {
    /// Creates a client for the given instance base URL.
    #[must_use]
    pub fn new(instance: Url) -> Self {
        Self { client: Client::new(), instance }
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, url::ParseError> {
        self.instance.join(&format!("api/{endpoint}"))
    }

    async fn send(
        &self,
        target: Result<Url, url::ParseError>,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
        let target = target.map_err(|e| format!("Invalid endpoint URL: {e}"))?;

        let response = self
            .client
            .post(target.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Request to {target} failed: {e}"))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response from {target}: {e}"))?;

        if !status.is_success() {
            return Err(format!("{target} returned {}: {response_text}", status.as_u16()).into());
        }

        let value = serde_json::from_str(&response_text)
            .map_err(|e| format!("Failed to parse response from {target}: {e}"))?;
        Ok(value)
    }
}

impl RemoteApi for LiveApiClient {
    fn post_json(&self, endpoint: &str, body: serde_json::Value) -> ApiFuture<'_> {
        let target = self.endpoint_url(endpoint);
        Box::pin(self.send(target, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_joined_under_api_root() {
        let client = LiveApiClient::new(Url::parse("https://blahaj.zone/").unwrap());
        let url = client.endpoint_url("users/notes").unwrap();
        assert_eq!(url.as_str(), "https://blahaj.zone/api/users/notes");
    }
}
