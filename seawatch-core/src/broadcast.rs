use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{BroadcastStream, errors::BroadcastStreamRecvError};
use tracing::warn;

use crate::{CoreResult, Tick, TickChannel, TickStream};

/// In-process tick channel backed by one tokio broadcast sender per topic.
///
/// Each topic retains a bounded ring of messages. A subscriber that cannot
/// keep up lags behind, skips the ticks it missed and continues from the
/// oldest retained one. Publishing to a topic with no subscribers is accepted
/// and the message dropped.
pub struct LocalTickChannel {
    capacity: usize,
    topics: Mutex<HashMap<String, broadcast::Sender<Tick>>>,
}

impl LocalTickChannel {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            topics: Mutex::new(HashMap::new()),
        }
    }

    fn sender(&self, topic: &str) -> broadcast::Sender<Tick> {
        let mut topics = self.topics.lock().unwrap();
        topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}

#[async_trait]
impl TickChannel for LocalTickChannel {
    async fn publish(&self, topic: &str, tick: Tick) -> CoreResult<()> {
        // A send error only means no subscriber is currently connected.
        let _ = self.sender(topic).send(tick);
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> CoreResult<TickStream> {
        let receiver = self.sender(topic).subscribe();

        let stream = BroadcastStream::new(receiver).filter_map(|message| async move {
            match message {
                Ok(tick) => Some(Ok(tick)),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    warn!("tick subscriber lagged, skipped {skipped} ticks");
                    None
                }
            }
        });

        Ok(stream.boxed())
    }
}
