//! Pacers backed by the tokio timer, plus a no-wait pacer for replay.

use std::time::Duration;

use crate::ports::pacer::{PauseFuture, Pacer};

/// Live pacer that sleeps on the tokio timer.
pub struct TokioPacer;

impl Pacer for TokioPacer {
    fn pause(&self, delay: Duration) -> PauseFuture<'_> {
        Box::pin(tokio::time::sleep(delay))
    }
}

/// Pacer that returns immediately. Used when replaying cassettes.
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn pause(&self, _delay: Duration) -> PauseFuture<'_> {
        Box::pin(std::future::ready(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tokio_pacer_waits_at_least_the_delay() {
        let start = std::time::Instant::now();
        TokioPacer.pause(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn instant_pacer_does_not_wait() {
        let start = std::time::Instant::now();
        InstantPacer.pause(Duration::from_secs(60)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
