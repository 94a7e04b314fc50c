use async_trait::async_trait;
use std::time::Duration;

/// Scheduled-delay seam for the polling loop.
///
/// Production uses the tokio timer; tests inject an implementation that
/// resolves immediately (or drives virtual time) so polling behavior can be
/// asserted without real delays.
#[async_trait]
pub trait RunTimer: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioTimer;

#[async_trait]
impl RunTimer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
