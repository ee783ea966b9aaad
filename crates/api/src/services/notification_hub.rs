//! In-process publish/subscribe hub connecting mutations to subscriptions.
//!
//! Each topic is backed by a `tokio::sync::broadcast` channel that only exists
//! while somebody listens to it. Delivery is fire-and-forget: an event
//! published with no live subscriber is dropped, and late subscribers never
//! see earlier events.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use infra::models::GameRow;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::{debug, warn};

pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    GameWon,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::GameWon => "gameWon",
        }
    }
}

#[derive(Debug, Clone)]
pub enum HubEvent {
    /// Snapshot of a game right after its winner was recorded.
    GameWon(GameRow),
}

impl HubEvent {
    pub fn topic(&self) -> Topic {
        match self {
            HubEvent::GameWon(_) => Topic::GameWon,
        }
    }
}

type Channels = HashMap<Topic, broadcast::Sender<HubEvent>>;

#[derive(Clone)]
pub struct NotificationHub {
    channels: Arc<Mutex<Channels>>,
    capacity: usize,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl NotificationHub {
    /// `capacity` bounds how far a subscriber may fall behind before it starts
    /// skipping events.
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Deliver `event` to every current subscriber of its topic.
    ///
    /// Never blocks. Returns how many subscribers the event reached.
    pub fn publish(&self, event: HubEvent) -> usize {
        let topic = event.topic();
        let channels = self.channels.lock();
        let delivered = channels
            .get(&topic)
            .and_then(|sender| sender.send(event).ok())
            .unwrap_or(0);

        if delivered == 0 {
            debug!(topic = topic.as_str(), "no subscribers; event dropped");
        } else {
            debug!(topic = topic.as_str(), delivered, "event published");
        }
        delivered
    }

    /// Register a listener on `topic`. It receives every event published from
    /// now on until the returned [`Subscription`] is dropped or cancelled.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        let receiver = {
            let mut channels = self.channels.lock();
            channels
                .entry(topic)
                .or_insert_with(|| broadcast::channel(self.capacity).0)
                .subscribe()
        };

        Subscription {
            topic,
            stream: Some(BroadcastStream::new(receiver)),
            channels: Arc::clone(&self.channels),
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels
            .lock()
            .get(&topic)
            .map_or(0, |sender| sender.receiver_count())
    }
}

/// A live, cancellable stream of hub events for one topic.
///
/// Dropping it unregisters the listener immediately; the transport drops it
/// when the client disconnects or completes the operation.
pub struct Subscription {
    topic: Topic,
    stream: Option<BroadcastStream<HubEvent>>,
    channels: Arc<Mutex<Channels>>,
}

impl Subscription {
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(stream) = self.stream.take() else {
            return;
        };
        drop(stream);

        // Prune the topic once its last listener is gone.
        let mut channels = self.channels.lock();
        if channels
            .get(&self.topic)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            channels.remove(&self.topic);
        }
        debug!(topic = self.topic.as_str(), "subscription released");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl Stream for Subscription {
    type Item = HubEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(stream) = this.stream.as_mut() else {
            return Poll::Ready(None);
        };

        loop {
            match Pin::new(&mut *stream).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => return Poll::Ready(Some(event)),
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(skipped)))) => {
                    warn!(
                        topic = this.topic.as_str(),
                        skipped, "subscriber fell behind; skipping events"
                    );
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
