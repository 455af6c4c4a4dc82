//! The resolution pipeline: account lookup, paginated note retrieval,
//! per-run caching, and link correlation.

pub mod cache;
pub mod correlate;
pub mod fetcher;
pub mod orchestrator;
pub mod resolver;

pub use cache::RunCache;
pub use correlate::correlate;
pub use fetcher::PostFetcher;
pub use orchestrator::{Orchestrator, PipelineOptions, RunReport};
pub use resolver::AccountResolver;
