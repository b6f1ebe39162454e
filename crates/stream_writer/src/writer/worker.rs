//! The single-flight drain-and-send loop.

use std::sync::Arc;

use ring_buffer::Drained;
use tokio::sync::{mpsc, oneshot};

use super::{Command, Shared};
use crate::error::WriteError;
use crate::sink::{Completion, ReadySignal, Sink};
use crate::trace::{
    trace_close_pending, trace_deferred, trace_detached, trace_failed, trace_ready, trace_shutdown,
    trace_submit,
};

/// Result of one drain-and-send pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PassOutcome {
    /// Nothing was staged.
    Idle,
    /// Every drained chunk was delivered.
    Delivered,
    /// The sink is saturated; the remaining bytes were reverted.
    Deferred,
    /// A submission failed; its bytes were reverted.
    Failed,
}

/// Owns the sink and runs one pass at a time, so at most one chunk is ever
/// in flight.
pub(super) struct Worker<S> {
    sink: S,
    shared: Arc<Shared>,
    commands: mpsc::UnboundedReceiver<Command>,
    ready: ReadySignal,
    chunk_limit: usize,
    awaiting_ready: bool,
    close_waiters: Vec<oneshot::Sender<()>>,
}

impl<S: Sink> Worker<S> {
    pub(super) fn new(
        sink: S,
        shared: Arc<Shared>,
        commands: mpsc::UnboundedReceiver<Command>,
        ready: ReadySignal,
        chunk_limit: usize,
    ) -> Self {
        Self {
            sink,
            shared,
            commands,
            ready,
            chunk_limit,
            awaiting_ready: false,
            close_waiters: Vec::new(),
        }
    }

    pub(super) async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                () = self.ready.notified() => self.on_ready().await,
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
            }
        }

        self.finish_deferred().await;
        trace_shutdown(self.shared.buffer().len());
    }

    /// Runs after the last handle is gone. Bytes deferred by saturation are
    /// still owed to the sink, so keep waiting for readiness until they are
    /// delivered or a submission fails. Pending `close` calls resolve only
    /// then.
    async fn finish_deferred(&mut self) {
        while self.awaiting_ready && !self.shared.buffer().is_empty() {
            trace_detached(self.shared.buffer().len());
            self.ready.notified().await;
            self.on_ready().await;
        }

        self.settle(PassOutcome::Idle);
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Drain => {
                let outcome = self.pass().await;
                self.settle(outcome);
            }
            Command::Barrier(done) => {
                let _ = done.send(());
            }
            Command::Close(done) => {
                self.close_waiters.push(done);
                let outcome = self.pass().await;
                self.settle(outcome);
            }
        }
    }

    async fn on_ready(&mut self) {
        self.awaiting_ready = false;
        trace_ready(self.shared.buffer().len());
        let outcome = self.pass().await;
        self.settle(outcome);
    }

    /// Drains and submits until the buffer is empty, the sink saturates or a
    /// submission fails.
    async fn pass(&mut self) -> PassOutcome {
        let mut outcome = PassOutcome::Idle;

        while let Some(drained) = self.drain() {
            if self.awaiting_ready {
                trace_deferred(drained.len());
                self.revert(drained);
                self.shared.stats.record_deferral();
                return PassOutcome::Deferred;
            }

            if !self.submit(drained).await {
                return PassOutcome::Failed;
            }
            outcome = PassOutcome::Delivered;
        }

        outcome
    }

    /// Hands `drained` to the sink and waits for its completion. On failure
    /// the bytes go back to the front of the buffer.
    async fn submit(&mut self, drained: Drained) -> bool {
        let len = drained.len();
        let (done, completion) = Completion::channel();

        let saturation = self.sink.submit(drained.to_vec(), done);
        self.awaiting_ready = saturation.is_saturated();
        self.shared.stats.record_submission();
        trace_submit(len, self.awaiting_ready);

        let error = match completion.await {
            Ok(Ok(())) => {
                self.shared.stats.record_delivered(len);
                return true;
            }
            Ok(Err(source)) => WriteError::Sink { len, source },
            Err(_) => WriteError::Abandoned { len },
        };

        self.revert(drained);
        self.shared.stats.record_failure();
        trace_failed(&error);
        self.shared.publish(error);
        false
    }

    /// Resolves pending `close` calls unless the flush is still waiting on
    /// the sink's readiness.
    fn settle(&mut self, outcome: PassOutcome) {
        if self.close_waiters.is_empty() {
            return;
        }

        if outcome == PassOutcome::Deferred {
            trace_close_pending(self.shared.buffer().len());
            return;
        }

        for waiter in self.close_waiters.drain(..) {
            let _ = waiter.send(());
        }
    }

    fn drain(&self) -> Option<Drained> {
        self.shared.buffer().drain_up_to(self.chunk_limit)
    }

    fn revert(&self, drained: Drained) {
        drained.revert(&mut self.shared.buffer());
    }
}
