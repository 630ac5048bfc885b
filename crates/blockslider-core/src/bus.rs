//! Publish/subscribe channel between the host page and slider articles.
//!
//! Inbound [`HostSignal`]s replace the page-wide event listeners a slider
//! would otherwise attach to; outbound [`SliderEvent`]s carry the broadcasts
//! a slider makes back to its host. Subscribers drain their queue from the
//! host's event loop; nothing here blocks.

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{trace, warn};

use crate::device::ScreenSize;

/// Default buffered messages per subscriber before the oldest are dropped
pub const DEFAULT_CAPACITY: usize = 256;

/// Signals the host page broadcasts to every article
#[derive(Debug, Clone, PartialEq)]
pub enum HostSignal {
    /// Viewport resized within the same screen-size class
    DeviceResize,
    /// Viewport crossed into a different screen-size class
    DeviceChanged(ScreenSize),
    /// Device orientation flipped
    OrientationChanged,
    /// Page is about to scroll to an element (`.<id>` selector)
    ScrollTo { selector: String },
    /// Page finished scrolling to an element
    ScrolledTo { selector: String },
    /// The article's model reported that all of its children are ready
    ModelReady,
    /// A component inside the article changed its own size
    ComponentResize,
    /// The page is being torn down
    Remove,
}

/// Lifecycle milestone of an article view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    PreRender,
    Render,
    PostRender,
}

/// Broadcasts made by articles back to the host
#[derive(Debug, Clone, PartialEq)]
pub enum SliderEvent {
    /// Stop any media left playing inside the blocks
    MediaStop,
    /// Generic "something resized" notification for the rest of the page
    WindowResize,
    /// View lifecycle milestone
    Lifecycle { article_id: String, phase: ViewPhase },
    /// The article finished its ready sequence
    Ready { article_id: String },
}

/// Typed broadcast channel
#[derive(Debug, Clone)]
pub struct EventBus<M> {
    tx: broadcast::Sender<M>,
}

impl<M: Clone> Default for EventBus<M> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<M: Clone> EventBus<M> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish to every current subscriber
    ///
    /// Returns the number of subscribers the message was queued for.
    pub fn publish(&self, message: M) -> usize {
        match self.tx.send(message) {
            Ok(count) => count,
            Err(_) => {
                trace!("Bus message dropped: no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> Subscription<M> {
        Subscription {
            rx: Some(self.tx.subscribe()),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Receiving end of an [`EventBus`]; unsubscribes when dropped
#[derive(Debug)]
pub struct Subscription<M> {
    rx: Option<broadcast::Receiver<M>>,
}

impl<M: Clone> Subscription<M> {
    /// Take every queued message without waiting
    pub fn drain(&mut self) -> Vec<M> {
        let mut messages = Vec::new();
        let Some(rx) = self.rx.as_mut() else {
            return messages;
        };

        loop {
            match rx.try_recv() {
                Ok(message) => messages.push(message),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Bus subscriber lagged, {} messages skipped", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        messages
    }

    /// Stop receiving; later drains return nothing
    pub fn unsubscribe(&mut self) {
        self.rx = None;
    }

    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }
}

/// The pair of channels an article is wired to at construction
#[derive(Debug, Clone, Default)]
pub struct HostBus {
    pub signals: EventBus<HostSignal>,
    pub events: EventBus<SliderEvent>,
}

impl HostBus {
    pub fn new() -> Self {
        Self::default()
    }
}
