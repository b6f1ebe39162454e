//! [`Sink`] adapter over a tokio [`AsyncWrite`].

use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use super::{Completion, ReadySignal, Saturation, Sink};

/// Default number of queued bytes at which the sink reports saturation (16 KiB).
pub const DEFAULT_HIGH_WATER_MARK: usize = 16 * 1024;

struct Job {
    chunk: Vec<u8>,
    done: Completion,
}

#[derive(Debug, Default)]
struct QueueState {
    queued: AtomicUsize,
    saturated: AtomicBool,
    ready: OnceLock<ReadySignal>,
}

/// Sink that feeds an [`AsyncWrite`] from a background task.
///
/// Submissions are queued for the task, which writes and flushes each chunk
/// in order and then resolves its [`Completion`]. Once the queued byte count
/// reaches the high-water mark the sink reports [`Saturation::Saturated`];
/// after the task has emptied the queue it fires the [`ReadySignal`].
///
/// A failed `write_all` may have written part of the chunk before failing.
/// The writer resubmits the whole chunk on its next attempt, so writers that
/// can fail mid-chunk may see those bytes twice.
///
/// Must be created inside a tokio runtime. Dropping the sink lets the task
/// finish the queued chunks and shut the inner writer down.
#[derive(Debug)]
pub struct AsyncWriteSink {
    jobs: mpsc::UnboundedSender<Job>,
    state: Arc<QueueState>,
    high_water_mark: usize,
}

impl AsyncWriteSink {
    /// Creates a sink with [`DEFAULT_HIGH_WATER_MARK`].
    pub fn new<W>(writer: W) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        Self::with_high_water_mark(writer, DEFAULT_HIGH_WATER_MARK)
    }

    /// Creates a sink that saturates once `high_water_mark` bytes are queued.
    ///
    /// A mark of zero is raised to one.
    pub fn with_high_water_mark<W>(writer: W, high_water_mark: usize) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (jobs, rx) = mpsc::unbounded_channel();
        let state = Arc::new(QueueState::default());
        tokio::spawn(drive(writer, rx, Arc::clone(&state)));

        Self {
            jobs,
            state,
            high_water_mark: high_water_mark.max(1),
        }
    }

    /// Returns the saturation threshold in bytes.
    #[must_use]
    pub const fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }

    /// Returns the number of bytes queued for the background task.
    #[must_use]
    pub fn queued_bytes(&self) -> usize {
        self.state.queued.load(Ordering::Acquire)
    }
}

impl Sink for AsyncWriteSink {
    fn submit(&mut self, chunk: Vec<u8>, done: Completion) -> Saturation {
        let len = chunk.len();
        let queued = self.state.queued.fetch_add(len, Ordering::AcqRel) + len;
        let saturated = queued >= self.high_water_mark;
        if saturated {
            self.state.saturated.store(true, Ordering::Release);
        }

        if let Err(mpsc::error::SendError(job)) = self.jobs.send(Job { chunk, done }) {
            self.state.queued.fetch_sub(len, Ordering::AcqRel);
            self.state.saturated.store(false, Ordering::Release);
            job.done.fail(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "async write sink task has stopped",
            ));
            return Saturation::Ready;
        }

        Saturation::from_saturated(saturated)
    }

    fn attach(&mut self, ready: ReadySignal) {
        // Only the first writer to bind the sink is notified.
        let _ = self.state.ready.set(ready);
    }
}

async fn drive<W>(mut writer: W, mut jobs: mpsc::UnboundedReceiver<Job>, state: Arc<QueueState>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(Job { chunk, done }) = jobs.recv().await {
        let result = write_chunk(&mut writer, &chunk).await;
        let remaining = state.queued.fetch_sub(chunk.len(), Ordering::AcqRel) - chunk.len();
        let emptied = remaining == 0 && state.saturated.swap(false, Ordering::AcqRel);
        done.complete(result);

        if emptied && let Some(ready) = state.ready.get() {
            ready.notify();
        }
    }

    let _ = writer.shutdown().await;
}

async fn write_chunk<W>(writer: &mut W, chunk: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(chunk).await?;
    writer.flush().await
}
