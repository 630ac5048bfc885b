//! Deferred "ready" signalling for slider articles.
//!
//! A [`ReadinessToken`] resolves at most once and can be observed by any
//! number of [`ReadinessWaiter`]s. The [`ReadinessGate`] drives it: first
//! every rendered image must load or fail, then a settle delay absorbs late
//! layout shifts, then the host model must report ready before a short
//! final delay resolves the token.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::schedule::Millis;
use crate::{Error, Result};

/// Pause after images settle before the first layout pass
pub const SETTLE_DELAY_MS: Millis = 500;

/// Pause between the model reporting ready and the token resolving
pub const READY_DELAY_MS: Millis = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Pending,
    Ready,
    Abandoned,
}

/// Single-resolution signal owned by one article
#[derive(Debug)]
pub struct ReadinessToken {
    tx: watch::Sender<Readiness>,
}

impl Default for ReadinessToken {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessToken {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Readiness::Pending);
        Self { tx }
    }

    pub fn state(&self) -> Readiness {
        *self.tx.borrow()
    }

    /// Resolve; false if it already resolved or was abandoned
    pub fn resolve(&self) -> bool {
        self.settle(Readiness::Ready)
    }

    /// Abandon a pending token so waiters stop waiting
    pub fn abandon(&self) -> bool {
        self.settle(Readiness::Abandoned)
    }

    fn settle(&self, to: Readiness) -> bool {
        self.tx.send_if_modified(|state| {
            if *state == Readiness::Pending {
                *state = to;
                true
            } else {
                false
            }
        })
    }

    pub fn waiter(&self) -> ReadinessWaiter {
        ReadinessWaiter {
            rx: self.tx.subscribe(),
        }
    }
}

/// Observer of a [`ReadinessToken`]
#[derive(Debug, Clone)]
pub struct ReadinessWaiter {
    rx: watch::Receiver<Readiness>,
}

impl ReadinessWaiter {
    pub fn state(&self) -> Readiness {
        *self.rx.borrow()
    }

    /// Wait until the token resolves
    ///
    /// Fails with [`Error::ReadinessAbandoned`] if it is abandoned or its
    /// owner goes away first.
    pub async fn wait(&mut self) -> Result<()> {
        let state = match self.rx.wait_for(|s| *s != Readiness::Pending).await {
            Ok(state) => *state,
            Err(_) => Readiness::Abandoned,
        };
        match state {
            Readiness::Ready => Ok(()),
            _ => Err(Error::ReadinessAbandoned),
        }
    }
}

/// Where an article is in its ready sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    /// Not rendered yet
    Idle,
    AwaitingImages { pending: usize },
    Settling,
    /// First layout pass done
    Rendered,
    /// Final delay running
    Finishing,
    Ready,
    TornDown,
}

/// Sequencing for the ready signal
///
/// Each method reports whether the caller should now run the next step;
/// the caller owns the timers.
#[derive(Debug)]
pub struct ReadinessGate {
    phase: GatePhase,
    model_ready: bool,
    token: ReadinessToken,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self {
            phase: GatePhase::Idle,
            model_ready: false,
            token: ReadinessToken::new(),
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == GatePhase::Ready
    }

    pub fn waiter(&self) -> ReadinessWaiter {
        self.token.waiter()
    }

    pub fn token_state(&self) -> Readiness {
        self.token.state()
    }

    /// Rendering finished with `pending_images` still loading
    ///
    /// True when the settle delay should start right away.
    pub fn begin(&mut self, pending_images: usize) -> bool {
        if self.phase != GatePhase::Idle {
            warn!(phase = ?self.phase, "Readiness gate already started");
            return false;
        }
        if pending_images == 0 {
            self.phase = GatePhase::Settling;
            return true;
        }
        debug!(pending_images, "Waiting for images");
        self.phase = GatePhase::AwaitingImages {
            pending: pending_images,
        };
        false
    }

    /// One image loaded or failed; true when it was the last one
    pub fn image_settled(&mut self) -> bool {
        match self.phase {
            GatePhase::AwaitingImages { pending } if pending <= 1 => {
                self.phase = GatePhase::Settling;
                true
            }
            GatePhase::AwaitingImages { pending } => {
                self.phase = GatePhase::AwaitingImages {
                    pending: pending - 1,
                };
                false
            }
            _ => false,
        }
    }

    /// Settle delay elapsed; true when the post-render step should run
    pub fn settle_elapsed(&mut self) -> bool {
        if self.phase != GatePhase::Settling {
            return false;
        }
        self.phase = GatePhase::Rendered;
        true
    }

    /// True when the final delay should start now
    pub fn model_ready(&mut self) -> bool {
        self.model_ready = true;
        self.try_finish()
    }

    /// After post-render: true when a model-ready report was waiting
    pub fn rendered(&mut self) -> bool {
        self.try_finish()
    }

    fn try_finish(&mut self) -> bool {
        if self.phase == GatePhase::Rendered && self.model_ready {
            self.phase = GatePhase::Finishing;
            return true;
        }
        false
    }

    /// Final delay elapsed; resolves the token exactly once
    pub fn ready_elapsed(&mut self) -> bool {
        if self.phase != GatePhase::Finishing {
            return false;
        }
        self.phase = GatePhase::Ready;
        self.token.resolve()
    }

    pub fn teardown(&mut self) {
        if self.token.abandon() {
            debug!("Readiness abandoned on teardown");
        }
        self.phase = GatePhase::TornDown;
    }
}

/// Page-level queue that holds navigation until every article is ready
#[derive(Debug, Default)]
pub struct WaitQueue {
    waiters: Vec<ReadinessWaiter>,
}

impl WaitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&mut self, waiter: ReadinessWaiter) {
        self.waiters.push(waiter);
    }

    pub fn len(&self) -> usize {
        self.waiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }

    /// Resolve once every queued article is ready or abandoned
    ///
    /// Returns how many actually became ready.
    pub async fn wait_all(self) -> usize {
        let mut ready = 0;
        for mut waiter in self.waiters {
            if waiter.wait().await.is_ok() {
                ready += 1;
            }
        }
        ready
    }
}
