//! Run settings resolved from CLI flags, the environment, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Maximum number of notes requested per page.
pub const PAGE_SIZE: u64 = 100;

/// Instance used when neither `--instance` nor `NOTELINK_INSTANCE` is set.
pub const DEFAULT_INSTANCE: &str = "https://blahaj.zone";

/// Default wait before each page request.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// What the orchestrator does when a link fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run on the first failure; no output is written.
    #[default]
    Abort,
    /// Log the failure, emit the no-match marker for the link, and continue.
    SkipLink,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the instance that resolves accounts and lists notes.
    pub instance: Url,
    /// Document to scan for links.
    pub input: PathBuf,
    /// File receiving one line per link.
    pub output: PathBuf,
    /// Wait before each page request.
    pub delay: Duration,
    /// Per-link failure handling.
    pub policy: FailurePolicy,
}

/// Raw values before defaults and validation are applied.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--instance`.
    pub instance: Option<String>,
    /// `--input`.
    pub input: Option<PathBuf>,
    /// `--output`.
    pub output: Option<PathBuf>,
    /// `--delay-ms`.
    pub delay_ms: Option<u64>,
    /// `--skip-failed-links`.
    pub skip_failed_links: bool,
}

impl Settings {
    /// Resolve settings, loading `.env` first so it can supply variables.
    ///
    /// # Errors
    ///
    /// Returns an error string if the instance URL or delay is invalid.
    pub fn load(overrides: Overrides) -> Result<Self, String> {
        // A missing .env file is normal.
        let _ = dotenvy::dotenv();
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve settings against an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error string if the instance URL or delay is invalid.
    pub fn resolve(
        overrides: Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let instance = overrides
            .instance
            .or_else(|| env("NOTELINK_INSTANCE"))
            .unwrap_or_else(|| DEFAULT_INSTANCE.to_string());
        let instance = parse_instance(&instance)?;

        let delay = match overrides.delay_ms {
            Some(ms) => Duration::from_millis(ms),
            None => match env("NOTELINK_DELAY_MS") {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| format!("Invalid NOTELINK_DELAY_MS {raw:?}: {e}"))?,
                None => DEFAULT_DELAY,
            },
        };

        let policy = if overrides.skip_failed_links {
            FailurePolicy::SkipLink
        } else {
            FailurePolicy::Abort
        };

        Ok(Self {
            instance,
            input: overrides.input.unwrap_or_else(|| PathBuf::from("input.txt")),
            output: overrides.output.unwrap_or_else(|| PathBuf::from("output.txt")),
            delay,
            policy,
        })
    }

    /// Prefix that a note id is appended to for its canonical URL.
    #[must_use]
    pub fn note_prefix(&self) -> String {
        format!("{}notes/", self.instance)
    }
}

/// Parse an instance base URL, normalizing it to end with `/` so that
/// relative joins land under it.
fn parse_instance(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| format!("Invalid instance URL {raw:?}: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(format!("Invalid instance URL {raw:?}: expected an http(s) base URL"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
