//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

use crate::adapters::live::api::LiveApiClient;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::pacer::{InstantPacer, TokioPacer};
use crate::adapters::recording::api::RecordingApiClient;
use crate::adapters::recording::filesystem::RecordingFileSystem;
use crate::adapters::replaying::{ReplayingApiClient, ReplayingFileSystem};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::api::RemoteApi;
use crate::ports::filesystem::FileSystem;
use crate::ports::pacer::Pacer;

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// replaying, recording).
pub struct ServiceContext {
    /// Remote instance API.
    pub api: Box<dyn RemoteApi>,
    /// Wait between page requests.
    pub pacer: Box<dyn Pacer>,
    /// Filesystem for the input document and output file.
    pub fs: Box<dyn FileSystem>,
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ServiceContext {
    /// Creates a live context talking to `instance`.
    #[must_use]
    pub fn live(instance: &Url) -> Self {
        Self {
            api: Box::new(LiveApiClient::new(instance.clone())),
            pacer: Box::new(TokioPacer),
            fs: Box::new(LiveFileSystem),
            replayer: None,
        }
    }

    /// Creates a live context that records API and filesystem interactions
    /// into per-port cassettes under `dir`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(dir: PathBuf, instance: &Url) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(dir, instance.as_str())?;
        let ctx = Self {
            api: Box::new(RecordingApiClient::new(
                Box::new(LiveApiClient::new(instance.clone())),
                Arc::clone(&session.api),
            )),
            pacer: Box::new(TokioPacer),
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&session.fs))),
            replayer: None,
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from one or more cassette files.
    ///
    /// Interactions from all files are served by a single replayer, so the
    /// per-port cassettes of a recording session can be passed together.
    /// Pacing is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if any cassette file cannot be read or parsed.
    pub fn replaying(paths: &[impl AsRef<Path>]) -> Result<Self, String> {
        let mut interactions = Vec::new();
        let mut first: Option<Cassette> = None;
        for path in paths {
            let mut cassette = Cassette::load(path.as_ref())?;
            interactions.append(&mut cassette.interactions);
            first.get_or_insert(cassette);
        }
        let mut cassette = first.ok_or("No cassette files given for replay")?;
        cassette.interactions = interactions;

        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
        Ok(Self {
            api: Box::new(ReplayingApiClient::new(Arc::clone(&replayer))),
            pacer: Box::new(InstantPacer),
            fs: Box::new(ReplayingFileSystem::new(Arc::clone(&replayer))),
            replayer: Some(replayer),
        })
    }

    /// Recorded interactions not consumed yet, when replaying.
    #[must_use]
    pub fn pending_replay(&self) -> Option<usize> {
        self.replayer
            .as_ref()
            .map(|r| r.lock().unwrap_or_else(PoisonError::into_inner).pending())
    }
}
