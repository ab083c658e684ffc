//! Test-case-to-runner message channel
//!
//! This crate provides the seam between a test case and the host runner
//! that created it. A case only ever pushes [`RunnerMessage`]s through a
//! [`RunnerSink`]; draining them, dispatching external commands, and
//! collecting results all happen on the runner's side of the channel.
//!
//! Everything here is synchronous. The host is single-threaded and
//! non-suspending, so the sink must never block the assertion path.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use testlet_core::RunnerMessage;
use tracing::{debug, trace};

/// Sink for messages a test case sends to its host runner
///
/// Implementations must not block: `send` is called from inside the
/// assertion path.
pub trait RunnerSink: Send + Sync {
    /// Forward one message to the runner
    fn send(&self, message: RunnerMessage);
}

/// Shared handle to a runner sink
///
/// Cases hold one of these; the runner itself is never owned by a case.
pub type SharedRunner = Arc<dyn RunnerSink>;

/// Channel-backed sink whose receiving side the host runner drains
pub struct ChannelRunner {
    tx: mpsc::Sender<RunnerMessage>,
}

impl ChannelRunner {
    /// Create a connected sink/receiver pair
    pub fn pair() -> (Self, mpsc::Receiver<RunnerMessage>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl RunnerSink for ChannelRunner {
    fn send(&self, message: RunnerMessage) {
        debug!(kind = message.kind(), "forwarding message to runner");
        // A dropped receiver means the runner is done with this case
        let _ = self.tx.send(message);
    }
}

/// Sink that records every message it receives, for tests
#[derive(Default)]
pub struct RecordingRunner {
    messages: Mutex<Vec<RunnerMessage>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far
    pub fn messages(&self) -> Vec<RunnerMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl RunnerSink for RecordingRunner {
    fn send(&self, message: RunnerMessage) {
        trace!(kind = message.kind(), "recording message");
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }
}
