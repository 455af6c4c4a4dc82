//! Drives one pass over the extracted links.
//!
//! Links are processed strictly in order, one at a time: parse the account
//! handle, resolve it, fetch (or reuse) its notes, correlate. Each link
//! yields exactly one [`CorrelationResult`].
//!
//! Under [`FailurePolicy::Abort`] the first error ends the run and no
//! results are returned, so the caller writes nothing. Under
//! [`FailurePolicy::SkipLink`] the failing link is logged and reported as
//! unmatched.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::{FailurePolicy, Settings};
use crate::error::Result;
use crate::model::{AccountHandle, CorrelationResult, ExtractedLink};
use crate::pipeline::cache::RunCache;
use crate::pipeline::correlate::correlate;
use crate::pipeline::fetcher::PostFetcher;
use crate::pipeline::resolver::AccountResolver;
use crate::ports::api::RemoteApi;
use crate::ports::pacer::Pacer;

/// Knobs the orchestrator needs from [`Settings`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Wait before each page request.
    pub delay: Duration,
    /// Canonical url prefix that note ids are appended to.
    pub note_prefix: String,
    /// Per-link failure handling.
    pub policy: FailurePolicy,
}

impl From<&Settings> for PipelineOptions {
    fn from(settings: &Settings) -> Self {
        Self { delay: settings.delay, note_prefix: settings.note_prefix(), policy: settings.policy }
    }
}

/// Mutable state for a single run, owned by the orchestrator.
#[derive(Debug, Default)]
struct RunContext {
    cache: RunCache,
    results: Vec<CorrelationResult>,
    skipped: usize,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// One result per extracted link, in input order.
    pub results: Vec<CorrelationResult>,
    /// Number of note-history fetch sequences performed.
    pub fetches: usize,
    /// Links that failed and were reported unmatched under `SkipLink`.
    pub skipped: usize,
}

impl RunReport {
    /// Number of links that matched a note.
    #[must_use]
    pub fn matched(&self) -> usize {
        self.results.iter().filter(|r| r.matched()).count()
    }
}

/// Sequential resolver → cache → fetcher → correlator driver.
pub struct Orchestrator<'a> {
    resolver: AccountResolver<'a>,
    fetcher: PostFetcher<'a>,
    options: PipelineOptions,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator over the given ports.
    #[must_use]
    pub fn new(api: &'a dyn RemoteApi, pacer: &'a dyn Pacer, options: PipelineOptions) -> Self {
        Self {
            resolver: AccountResolver::new(api),
            fetcher: PostFetcher::new(api, pacer, options.delay),
            options,
        }
    }

    /// Process every link and return the ordered results.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::Abort`], returns the first link, resolution,
    /// or fetch error encountered.
    pub async fn run(&self, links: &[ExtractedLink]) -> Result<RunReport> {
        let mut ctx = RunContext::default();

        for (index, link) in links.iter().enumerate() {
            match self.process_link(link, &mut ctx.cache).await {
                Ok(result) => ctx.results.push(result),
                Err(err) => match self.options.policy {
                    FailurePolicy::Abort => return Err(err),
                    FailurePolicy::SkipLink => {
                        warn!(index, %link, error = %err, "skipping link");
                        ctx.skipped += 1;
                        ctx.results.push(CorrelationResult {
                            original_link: link.clone(),
                            canonical_url: None,
                        });
                    }
                },
            }
        }

        let report = RunReport {
            fetches: ctx.cache.fetches(),
            skipped: ctx.skipped,
            results: ctx.results,
        };
        info!(
            links = links.len(),
            matched = report.matched(),
            fetches = report.fetches,
            skipped = report.skipped,
            "run complete"
        );
        Ok(report)
    }

    async fn process_link(&self, link: &str, cache: &mut RunCache) -> Result<CorrelationResult> {
        let handle = AccountHandle::from_link(link)?;
        info!(%link, username = %handle.username, host = %handle.host, "processing link");

        let account = self.resolver.resolve(&handle).await?;
        let posts = cache.get_or_fetch(&account, &self.fetcher).await?;
        Ok(correlate(link, posts, &self.options.note_prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::pacer::InstantPacer;
    use crate::error::PipelineError;
    use crate::model::NO_MATCH_MARKER;
    use crate::pipeline::testing::{note_page, ScriptedApi};
    use serde_json::json;

    fn options(policy: FailurePolicy) -> PipelineOptions {
        PipelineOptions {
            delay: Duration::ZERO,
            note_prefix: "https://blahaj.zone/notes/".into(),
            policy,
        }
    }

    fn alice() -> serde_json::Value {
        json!({"id": "alice-id", "notesCount": 3})
    }

    #[tokio::test]
    async fn two_links_to_one_account_share_a_single_fetch() {
        let scripted = ScriptedApi::new(vec![alice(), note_page("n", 3), alice()]);
        let orchestrator = Orchestrator::new(&scripted.api, &InstantPacer, options(FailurePolicy::Abort));
        let links = vec![
            "https://example.social/@alice/n1".to_string(),
            "https://example.social/@alice/missing".to_string(),
        ];

        let report = orchestrator.run(&links).await.unwrap();

        let lines: Vec<_> = report.results.iter().map(CorrelationResult::to_line).collect();
        assert_eq!(
            lines,
            vec![
                "https://blahaj.zone/notes/n1 = https://example.social/@alice/n1".to_string(),
                NO_MATCH_MARKER.to_string(),
            ]
        );
        assert_eq!(report.fetches, 1);
        assert_eq!(report.matched(), 1);

        let endpoints: Vec<_> = scripted.requests().into_iter().map(|(e, _)| e).collect();
        assert_eq!(endpoints, vec!["users/show", "users/notes", "users/show"]);
    }

    #[tokio::test]
    async fn results_follow_input_order_across_accounts() {
        let bob = json!({"id": "bob-id", "notesCount": 1});
        let bob_page = json!([{"id": "b0", "url": "https://other.example/@bob/7"}]);
        let scripted =
            ScriptedApi::new(vec![alice(), note_page("n", 3), bob, bob_page, alice()]);
        let orchestrator = Orchestrator::new(&scripted.api, &InstantPacer, options(FailurePolicy::Abort));
        let links = vec![
            "https://example.social/@alice/n2".to_string(),
            "https://other.example/@bob/7".to_string(),
            "https://example.social/@alice/n0".to_string(),
        ];

        let report = orchestrator.run(&links).await.unwrap();

        let canon: Vec<_> =
            report.results.iter().map(|r| r.canonical_url.clone().unwrap()).collect();
        assert_eq!(
            canon,
            vec![
                "https://blahaj.zone/notes/n2",
                "https://blahaj.zone/notes/b0",
                "https://blahaj.zone/notes/n0",
            ]
        );
        assert_eq!(report.fetches, 2);
    }

    #[tokio::test]
    async fn bad_link_aborts_the_run_by_default() {
        let scripted = ScriptedApi::new(vec![]);
        let orchestrator = Orchestrator::new(&scripted.api, &InstantPacer, options(FailurePolicy::Abort));
        let links = vec!["https://example.social/".to_string(), "https://example.social/@alice/1".to_string()];

        let err = orchestrator.run(&links).await.unwrap_err();

        assert!(matches!(err, PipelineError::LinkParse { .. }));
        assert!(scripted.requests().is_empty());
    }

    #[tokio::test]
    async fn skip_policy_reports_failed_links_unmatched_and_continues() {
        let scripted = ScriptedApi::new(vec![alice(), note_page("n", 3)]);
        let orchestrator =
            Orchestrator::new(&scripted.api, &InstantPacer, options(FailurePolicy::SkipLink));
        let links = vec!["https://example.social/".to_string(), "https://example.social/@alice/n0".to_string()];

        let report = orchestrator.run(&links).await.unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.skipped, 1);
        assert!(!report.results[0].matched());
        assert!(report.results[1].matched());
    }

    #[tokio::test]
    async fn no_links_is_an_empty_report() {
        let scripted = ScriptedApi::new(vec![]);
        let orchestrator = Orchestrator::new(&scripted.api, &InstantPacer, options(FailurePolicy::Abort));

        let report = orchestrator.run(&[]).await.unwrap();

        assert!(report.results.is_empty());
        assert_eq!(report.fetches, 0);
    }
}
