//! Replaying adapters that replay recorded interactions.

pub mod api;
pub mod filesystem;

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use api::ReplayingApiClient;
pub use filesystem::ReplayingFileSystem;

/// Pull the next recorded output for `port::method` from a shared replayer.
///
/// Mirror of `recording::record_result`.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).output.clone()
}

/// Like [`next_output`], also returning the endpoint the call was recorded
/// against, when its input names one.
pub(crate) fn next_call(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> (Option<String>, serde_json::Value) {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    let interaction = guard.next_interaction(port, method);
    let endpoint =
        interaction.input.get("endpoint").and_then(serde_json::Value::as_str).map(str::to_string);
    (endpoint, interaction.output.clone())
}

/// Decode a recorded `{"Ok": v}` / `{"Err": msg}` output back into a `Result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    match output {
        serde_json::Value::Object(mut map) => {
            if let Some(err) = map.remove("Err") {
                let msg = err.as_str().unwrap_or("unknown error").to_string();
                return Err(msg.into());
            }
            let value = map.remove("Ok").unwrap_or(serde_json::Value::Object(map));
            Ok(serde_json::from_value(value)?)
        }
        other => Ok(serde_json::from_value(other)?),
    }
}
