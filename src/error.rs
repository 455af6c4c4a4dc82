//! Error taxonomy for a resolution run.

use thiserror::Error;

use crate::model::Post;

/// Boxed error produced by port implementations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Convenience alias for pipeline results.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failures that stop processing of a link.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The extracted link is malformed or has no account segment.
    #[error("cannot parse link {link}: {reason}")]
    LinkParse {
        /// The offending link.
        link: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Looking up the account failed.
    #[error("failed to resolve account {username}@{host}: {source}")]
    Resolution {
        /// Username sent to the instance.
        username: String,
        /// Host sent to the instance.
        host: String,
        /// Underlying transport or decoding failure.
        source: PortError,
    },

    /// Fetching an account's notes failed part-way.
    #[error("failed to fetch notes for account {account_id} after {} notes: {source}", .partial.len())]
    Fetch {
        /// Account whose history was being fetched.
        account_id: String,
        /// Notes accumulated before the failure.
        partial: Vec<Post>,
        /// Underlying transport or decoding failure.
        source: PortError,
    },
}
