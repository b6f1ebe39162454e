//! The sink capability consumed by the writer.

mod async_write;

use std::io;
use std::sync::Arc;

use tokio::sync::{Notify, oneshot};

pub use async_write::{AsyncWriteSink, DEFAULT_HIGH_WATER_MARK};

/// Whether a sink can take more data after a submission.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Saturation {
    /// The sink accepts further submissions.
    Ready,
    /// The sink wants no further submissions until it fires its
    /// [`ReadySignal`].
    Saturated,
}

impl Saturation {
    /// Maps a "buffer is full" flag to a saturation state.
    #[must_use]
    pub const fn from_saturated(saturated: bool) -> Self {
        if saturated {
            Self::Saturated
        } else {
            Self::Ready
        }
    }

    /// Returns `true` for [`Saturation::Saturated`].
    #[must_use]
    pub const fn is_saturated(self) -> bool {
        matches!(self, Self::Saturated)
    }
}

/// One-shot completion callback handed to [`Sink::submit`].
///
/// The sink must eventually call [`Completion::complete`] (or one of its
/// shorthands). Dropping a completion without calling it counts as a failed
/// submission: the writer restores the chunk and reports
/// [`WriteError::Abandoned`](crate::WriteError::Abandoned).
#[derive(Debug)]
#[must_use = "the writer waits until the completion is resolved"]
pub struct Completion {
    tx: oneshot::Sender<io::Result<()>>,
}

impl Completion {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<io::Result<()>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// Reports the outcome of the submission.
    pub fn complete(self, result: io::Result<()>) {
        // The writer only stops listening once it has shut down.
        let _ = self.tx.send(result);
    }

    /// Reports a successful submission.
    pub fn succeed(self) {
        self.complete(Ok(()));
    }

    /// Reports a failed submission.
    pub fn fail(self, error: io::Error) {
        self.complete(Err(error));
    }
}

/// Readiness notification a saturated sink fires once it can accept data
/// again.
///
/// A notification sent while the writer is busy is remembered and consumed by
/// the writer's next wait, so sinks may fire it from any thread at any time.
#[derive(Clone, Debug, Default)]
pub struct ReadySignal {
    notify: Arc<Notify>,
}

impl ReadySignal {
    /// Creates an unconnected signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tells the writer the sink can accept more data.
    pub fn notify(&self) {
        self.notify.notify_one();
    }

    /// Waits for the next notification.
    pub async fn notified(&self) {
        self.notify.notified().await;
    }
}

/// Destination of the bytes staged by a [`BufferedWriter`](crate::BufferedWriter).
///
/// The writer owns its sink for its whole lifetime and never submits a new
/// chunk before the previous [`Completion`] resolved.
pub trait Sink: Send + 'static {
    /// Accepts `chunk` and reports the outcome through `done`.
    ///
    /// The return value says whether the sink is now saturated. A sink that
    /// returns [`Saturation::Saturated`] must fire the [`ReadySignal`] passed
    /// to [`Sink::attach`] once it can accept data again; until then the
    /// writer keeps everything staged.
    fn submit(&mut self, chunk: Vec<u8>, done: Completion) -> Saturation;

    /// Receives the readiness signal when the writer binds the sink.
    ///
    /// Sinks that never saturate can ignore it.
    fn attach(&mut self, ready: ReadySignal) {
        let _ = ready;
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn submit(&mut self, chunk: Vec<u8>, done: Completion) -> Saturation {
        (**self).submit(chunk, done)
    }

    fn attach(&mut self, ready: ReadySignal) {
        (**self).attach(ready);
    }
}
