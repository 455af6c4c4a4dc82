//! `notelink extract` command.

use std::fmt::Write;
use std::path::Path;

use crate::extract::extract_links;
use crate::model::AccountHandle;

/// Execute the `extract` command.
///
/// Prints each link with the account handle it resolves to, without
/// contacting the instance.
///
/// # Errors
///
/// Returns an error string if the input document cannot be read.
pub fn run(input: &Path) -> Result<(), String> {
    let document = std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {}: {e}", input.display()))?;
    print!("{}", render(&document));
    Ok(())
}

fn render(document: &str) -> String {
    let links = extract_links(document);
    if links.is_empty() {
        return "No links found.\n".to_string();
    }

    let mut out = String::new();
    for link in &links {
        let handle = match AccountHandle::from_link(link) {
            Ok(handle) => format!("{}@{}", handle.username, handle.host),
            Err(err) => format!("(unparseable: {err})"),
        };
        let _ = writeln!(out, "{link}\t{handle}");
    }
    let _ = write!(out, "\n{} link(s) found.\n", links.len());
    out
}
