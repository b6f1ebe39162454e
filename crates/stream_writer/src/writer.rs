//! The buffered writer handle.

mod worker;

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use ring_buffer::RingBuffer;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::config::WriterConfig;
use crate::encoder::{Encoder, Utf8Encoder};
use crate::error::WriteError;
use crate::input::Input;
use crate::sink::{ReadySignal, Sink};
use crate::stats::{StatsCounters, WriterStats};
use crate::trace::{trace_rejected, trace_write_after_close};

use self::worker::Worker;

/// Work items processed by the worker task in FIFO order.
pub(crate) enum Command {
    /// Run one drain-and-send pass.
    Drain,
    /// Resolve once every earlier command has been processed.
    Barrier(oneshot::Sender<()>),
    /// Run a final pass and resolve once the staged bytes are delivered or a
    /// submission fails.
    Close(oneshot::Sender<()>),
}

/// State shared between the handles and the worker task.
pub(crate) struct Shared {
    buffer: Mutex<RingBuffer>,
    stats: StatsCounters,
    closed: AtomicBool,
    errors: broadcast::Sender<Arc<WriteError>>,
}

impl Shared {
    fn new(config: &WriterConfig) -> Self {
        let (errors, _) = broadcast::channel(config.error_channel_capacity());
        Self {
            buffer: Mutex::new(RingBuffer::with_policy(
                config.buffer_capacity(),
                config.overflow_policy(),
            )),
            stats: StatsCounters::default(),
            closed: AtomicBool::new(false),
            errors,
        }
    }

    pub(crate) fn buffer(&self) -> MutexGuard<'_, RingBuffer> {
        self.buffer.lock().expect("staging buffer mutex poisoned")
    }

    pub(crate) fn publish(&self, error: WriteError) {
        // No subscribers is fine: failures are also traced.
        let _ = self.errors.send(Arc::new(error));
    }
}

/// Cloneable handle to a buffered writer bound to one [`Sink`].
///
/// Every clone feeds the same staging buffer and worker task. Once the last
/// handle is dropped the worker finishes the queued operations, waits for the
/// sink's readiness if bytes are still deferred, then stops and drops the
/// sink. Pending [`close`](Self::close) futures resolve only after that final
/// flush.
#[derive(Clone)]
pub struct BufferedWriter {
    shared: Arc<Shared>,
    commands: mpsc::UnboundedSender<Command>,
    encoder: Arc<dyn Encoder>,
}

impl fmt::Debug for BufferedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedWriter")
            .field("buffered", &self.buffered_len())
            .field("closed", &self.is_closed())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl BufferedWriter {
    /// Binds `sink` to a new writer that encodes text as UTF-8.
    ///
    /// Spawns the worker onto the current tokio runtime, so this must be
    /// called from within one.
    pub fn spawn<S: Sink>(sink: S, config: WriterConfig) -> Self {
        Self::spawn_with_encoder(sink, Utf8Encoder, config)
    }

    /// Binds `sink` to a new writer that encodes text with `encoder`.
    ///
    /// Spawns the worker onto the current tokio runtime, so this must be
    /// called from within one.
    pub fn spawn_with_encoder<S, E>(mut sink: S, encoder: E, config: WriterConfig) -> Self
    where
        S: Sink,
        E: Encoder + 'static,
    {
        let shared = Arc::new(Shared::new(&config));
        let ready = ReadySignal::new();
        sink.attach(ready.clone());

        let (commands, rx) = mpsc::unbounded_channel();
        let worker = Worker::new(sink, Arc::clone(&shared), rx, ready, config.chunk_limit());
        tokio::spawn(worker.run());

        Self {
            shared,
            commands,
            encoder: Arc::new(encoder),
        }
    }

    /// Stages `input` and schedules its delivery behind every earlier write.
    ///
    /// Returns immediately. Encoding and staging failures are published on
    /// the error channel and nothing is staged for this call.
    pub fn write<'a>(&self, input: impl Into<Input<'a>>) {
        let staged = match input.into() {
            Input::Bytes(bytes) => self.stage(bytes),
            Input::Text(text) => match self.encoder.encode(text) {
                Ok(bytes) => self.stage(&bytes),
                Err(error) => Err(WriteError::from(error)),
            },
        };

        match staged {
            Ok(()) => self.schedule(Command::Drain),
            Err(error) => {
                trace_rejected(&error);
                self.shared.publish(error);
            }
        }
    }

    /// Returns a future that resolves once every operation scheduled so far
    /// has settled.
    ///
    /// Unlike [`close`](Self::close) this does not wait for bytes deferred by
    /// a saturated sink.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let (tx, rx) = oneshot::channel();
        self.schedule(Command::Barrier(tx));
        async move {
            let _ = rx.await;
        }
    }

    /// Flushes the staged bytes and returns a future that resolves once they
    /// were delivered, or once a submission failed.
    ///
    /// If the sink is saturated the future stays pending until the sink
    /// signals readiness and the deferred bytes go out. A sink that never
    /// signals readiness keeps the future pending forever.
    ///
    /// Calling `close` again is harmless; later calls find nothing new to
    /// flush. Writes issued after `close` are still delivered.
    pub fn close(&self) -> impl Future<Output = ()> + Send + 'static {
        self.shared.closed.store(true, Ordering::Release);
        let (tx, rx) = oneshot::channel();
        self.schedule(Command::Close(tx));
        async move {
            let _ = rx.await;
        }
    }

    /// Subscribes to failures of the asynchronous pipeline.
    ///
    /// Only failures published after the call are received.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<WriteError>> {
        self.shared.errors.subscribe()
    }

    /// Returns a snapshot of the delivery counters.
    #[must_use]
    pub fn stats(&self) -> WriterStats {
        self.shared.stats.snapshot()
    }

    /// Returns the number of bytes currently staged.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.shared.buffer().len()
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    fn stage(&self, bytes: &[u8]) -> Result<(), WriteError> {
        self.shared.buffer().append(bytes)?;
        self.shared.stats.record_written(bytes.len());
        if self.is_closed() {
            trace_write_after_close(bytes.len());
        }
        Ok(())
    }

    fn schedule(&self, command: Command) {
        // The worker outlives every handle; a send only fails if its task
        // panicked or the runtime shut down, and then dropping the command
        // resolves any waiter it carried.
        let _ = self.commands.send(command);
    }
}
