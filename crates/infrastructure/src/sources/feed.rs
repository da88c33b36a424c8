//! Push-style delivery of style text.
//!
//! Hosts that observe style changes (added stylesheets, edited inline
//! styles) send each change as a batch; a forwarder task hands every batch
//! to the engine in arrival order.

use std::sync::Arc;

use dynamo_application::{Engine, StyleBatch};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// The forwarder has stopped and no longer accepts batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("style feed is closed")]
pub struct FeedClosed;

/// Sending half of a style feed. Clones feed the same engine.
#[derive(Debug, Clone)]
pub struct StyleFeed {
    sender: mpsc::Sender<StyleBatch>,
}

impl StyleFeed {
    /// Spawns a forwarder extracting every received batch into `engine`.
    ///
    /// The forwarder ends once every `StyleFeed` clone is dropped and
    /// resolves to the number of variables it discovered.
    #[must_use]
    pub fn spawn(engine: Arc<Engine>, capacity: usize) -> (Self, JoinHandle<usize>) {
        let (sender, mut receiver) = mpsc::channel::<StyleBatch>(capacity.max(1));
        let forwarder = tokio::spawn(async move {
            let mut discovered = 0;
            while let Some(batch) = receiver.recv().await {
                discovered += engine.extract(batch).len();
            }
            debug!(discovered, "Style feed closed");
            discovered
        });
        (Self { sender }, forwarder)
    }

    /// Delivers one logical style change.
    ///
    /// # Errors
    ///
    /// Returns `FeedClosed` if the forwarder is gone.
    pub async fn send(&self, style: impl Into<StyleBatch>) -> Result<(), FeedClosed> {
        self.sender.send(style.into()).await.map_err(|_| FeedClosed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use dynamo_application::EngineConfig;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_batches_reach_engine_in_order() {
        let engine = Arc::new(Engine::in_memory(EngineConfig::default()).unwrap());
        let (feed, forwarder) = StyleFeed::spawn(Arc::clone(&engine), 4);

        feed.send("var(--first)").await.unwrap();
        feed
            .send(vec!["var(--second)", "var(--first)"])
            .await
            .unwrap();
        feed.clone().send("no references").await.unwrap();
        drop(feed);

        assert_eq!(forwarder.await.unwrap(), 2);
        assert_eq!(engine.known_variables(), vec!["--second", "--first"]);
    }

    #[tokio::test]
    async fn test_send_after_forwarder_stops() {
        let engine = Arc::new(Engine::in_memory(EngineConfig::default()).unwrap());
        let (feed, forwarder) = StyleFeed::spawn(engine, 1);
        forwarder.abort();
        let _ = forwarder.await;

        assert_eq!(feed.send("var(--a)").await, Err(FeedClosed));
    }
}
