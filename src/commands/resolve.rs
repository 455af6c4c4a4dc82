//! `notelink resolve` command.

use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::cli::ResolveArgs;
use crate::config::{Overrides, Settings};
use crate::context::ServiceContext;
use crate::extract::extract_links;
use crate::model::render_output;
use crate::pipeline::{Orchestrator, PipelineOptions, RunReport};

/// Execute the `resolve` command.
///
/// When `NOTELINK_RECORD` is set to a directory path, API and filesystem
/// interactions are recorded to per-port cassette files in that directory.
/// With `--replay`, they are served from cassettes instead.
///
/// # Errors
///
/// Returns an error string if settings are invalid, the input cannot be
/// read, any link fails under the abort policy, or the output cannot be
/// written. Nothing is written on failure.
pub fn run(args: &ResolveArgs) -> Result<(), String> {
    let settings = Settings::load(Overrides {
        instance: args.instance.clone(),
        input: args.input.clone(),
        output: args.output.clone(),
        delay_ms: args.delay_ms,
        skip_failed_links: args.skip_failed_links,
    })?;

    if !args.replay.is_empty() {
        let ctx = ServiceContext::replaying(args.replay.as_slice())?;
        let result = run_with_context(&ctx, &settings);
        if let Some(pending) = ctx.pending_replay().filter(|&n| n > 0) {
            warn!(pending, "replay finished with unused cassette interactions");
        }
        return result.map(|report| print_summary(&report, &settings));
    }

    if let Ok(dir) = env::var("NOTELINK_RECORD") {
        let (ctx, session) = ServiceContext::recording_at(PathBuf::from(dir), &settings.instance)?;
        let result = run_with_context(&ctx, &settings);
        // Drop context first to release the recorders.
        drop(ctx);
        let output_dir = session.finish()?;
        eprintln!("Recording saved to: {}", output_dir.display());
        return result.map(|report| print_summary(&report, &settings));
    }

    let ctx = ServiceContext::live(&settings.instance);
    run_with_context(&ctx, &settings).map(|report| print_summary(&report, &settings))
}

/// Read the input, run the pipeline, and write the output through `ctx`.
///
/// # Errors
///
/// Returns an error string on any read, pipeline, or write failure.
pub fn run_with_context(ctx: &ServiceContext, settings: &Settings) -> Result<RunReport, String> {
    let document = ctx
        .fs
        .read_to_string(&settings.input)
        .map_err(|e| format!("Failed to read {}: {e}", settings.input.display()))?;
    let links = extract_links(&document);
    info!(input = %settings.input.display(), links = links.len(), "extracted links");

    let orchestrator =
        Orchestrator::new(ctx.api.as_ref(), ctx.pacer.as_ref(), PipelineOptions::from(settings));
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    let report = runtime.block_on(orchestrator.run(&links)).map_err(|e| e.to_string())?;

    ctx.fs
        .write(&settings.output, &render_output(&report.results))
        .map_err(|e| format!("Failed to write {}: {e}", settings.output.display()))?;
    Ok(report)
}

fn print_summary(report: &RunReport, settings: &Settings) {
    println!(
        "Resolved {} of {} link(s) into {}.",
        report.matched(),
        report.results.len(),
        settings.output.display()
    );
}
