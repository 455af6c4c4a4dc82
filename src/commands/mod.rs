//! Command dispatch and handlers.

pub mod extract;
pub mod resolve;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Resolve(args) => resolve::run(args),
        Command::Extract { input } => extract::run(input),
    }
}
