//! Recording session managing per-port cassette recorders.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing to a separate cassette file in
/// the session's output directory.
pub struct RecordingSession {
    /// Recorder for remote API interactions.
    pub api: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for filesystem interactions.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session writing into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(output_dir: PathBuf, instance: &str) -> Result<Self, String> {
        std::fs::create_dir_all(&output_dir).map_err(|e| {
            format!("Failed to create cassette directory {}: {e}", output_dir.display())
        })?;

        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, instance)))
        };

        Ok(Self { api: make_recorder("api"), fs: make_recorder("fs"), output_dir })
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if a recording adapter is still alive or any
    /// cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.api, "api")?;
        finish_one(self.fs, "fs")?;

        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Cassette;
    use serde_json::json;

    #[test]
    fn session_writes_one_cassette_per_port() {
        let dir = tempfile::tempdir().unwrap();
        let session =
            RecordingSession::new(dir.path().join("run"), "https://example.social").unwrap();
        session.api.lock().unwrap().record("api", "post_json", json!({}), json!({"Ok": []}));

        let output_dir = session.finish().unwrap();

        let api = Cassette::load(&output_dir.join("api.cassette.yaml")).unwrap();
        let fs = Cassette::load(&output_dir.join("fs.cassette.yaml")).unwrap();
        assert_eq!(api.interactions.len(), 1);
        assert!(fs.interactions.is_empty());
        assert_eq!(api.instance, "https://example.social");
    }

    #[test]
    fn finish_fails_while_an_adapter_holds_a_recorder() {
        let dir = tempfile::tempdir().unwrap();
        let session =
            RecordingSession::new(dir.path().to_path_buf(), "https://example.social").unwrap();
        let _held = Arc::clone(&session.api);

        let err = session.finish().unwrap_err();
        assert!(err.contains("api still has references"));
    }
}
