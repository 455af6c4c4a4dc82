//! Pacer port for spacing out remote requests.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future returned by [`Pacer::pause`].
pub type PauseFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Waits between requests to stay under the remote service's rate limits.
///
/// Abstracting the wait lets tests and cassette replay run without sleeping.
pub trait Pacer: Send + Sync {
    /// Suspends for `delay`.
    fn pause(&self, delay: Duration) -> PauseFuture<'_>;
}
