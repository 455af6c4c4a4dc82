//! Binary entrypoint for the `notelink` CLI.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notelink=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Recording is handled in commands::resolve via NOTELINK_RECORD=<dir>.
    match notelink::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
