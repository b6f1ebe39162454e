//! Scriptable sink shared by the writer integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use stream_writer::{Completion, ReadySignal, Saturation, Sink};

/// How the sink resolves each submission.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Complete successfully inside `submit`.
    Immediate,
    /// Hold completions until the test resolves them.
    Manual,
}

#[derive(Default)]
struct State {
    submissions: Vec<Vec<u8>>,
    delivered: Vec<u8>,
    pending: VecDeque<(Vec<u8>, Completion)>,
    ready: Option<ReadySignal>,
    saturate_at: Option<usize>,
    fail_next: usize,
    manual: bool,
}

/// Sink half, moved into the writer.
pub struct ScriptedSink {
    state: Arc<Mutex<State>>,
}

/// Test half, used to inspect and drive the sink.
#[derive(Clone)]
pub struct Probe {
    state: Arc<Mutex<State>>,
}

pub fn scripted(mode: Mode) -> (ScriptedSink, Probe) {
    let state = Arc::new(Mutex::new(State {
        manual: mode == Mode::Manual,
        ..State::default()
    }));
    (
        ScriptedSink {
            state: Arc::clone(&state),
        },
        Probe { state },
    )
}

impl Sink for ScriptedSink {
    fn submit(&mut self, chunk: Vec<u8>, done: Completion) -> Saturation {
        let mut state = self.state.lock().unwrap();
        state.submissions.push(chunk.clone());
        let saturated = state.saturate_at.is_some_and(|limit| chunk.len() >= limit);

        if state.fail_next > 0 {
            state.fail_next -= 1;
            done.fail(io::Error::new(io::ErrorKind::BrokenPipe, "scripted failure"));
        } else if state.manual {
            state.pending.push_back((chunk, done));
        } else {
            state.delivered.extend_from_slice(&chunk);
            done.succeed();
        }

        Saturation::from_saturated(saturated)
    }

    fn attach(&mut self, ready: ReadySignal) {
        self.state.lock().unwrap().ready = Some(ready);
    }
}

impl Probe {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Report saturation for every chunk of at least `limit` bytes.
    pub fn saturate_at(&self, limit: usize) {
        self.state().saturate_at = Some(limit);
    }

    /// Fail the next `count` submissions.
    pub fn fail_next(&self, count: usize) {
        self.state().fail_next = count;
    }

    /// Switch between immediate and manual completion.
    pub fn set_mode(&self, mode: Mode) {
        self.state().manual = mode == Mode::Manual;
    }

    pub fn submissions(&self) -> Vec<Vec<u8>> {
        self.state().submissions.clone()
    }

    pub fn delivered(&self) -> Vec<u8> {
        self.state().delivered.clone()
    }

    pub fn pending(&self) -> usize {
        self.state().pending.len()
    }

    /// Resolve the oldest held completion.
    pub fn complete_next(&self, result: io::Result<()>) {
        let (chunk, done) = self
            .state()
            .pending
            .pop_front()
            .expect("a submission is pending");
        if result.is_ok() {
            self.state().delivered.extend_from_slice(&chunk);
        }
        done.complete(result);
    }

    /// Fire the readiness notification the writer attached.
    pub fn fire_ready(&self) {
        let ready = self.state().ready.clone().expect("writer attached");
        ready.notify();
    }

    /// Wait until the writer has made `count` submissions.
    pub async fn wait_for_submissions(&self, count: usize) {
        within(async {
            while self.state().submissions.len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await;
    }

    /// Wait until a completion is held.
    pub async fn wait_for_pending(&self) {
        within(async {
            while self.state().pending.is_empty() {
                tokio::task::yield_now().await;
            }
        })
        .await;
    }
}

/// Fails the test if `future` takes longer than five seconds.
pub async fn within<F: std::future::Future>(future: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(5), future)
        .await
        .expect("timed out")
}

/// Yields a few times and reports whether `future` is still pending.
pub async fn still_pending<F>(future: &mut F) -> bool
where
    F: std::future::Future + Unpin,
{
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
    futures_poll_once(future).await.is_none()
}

async fn futures_poll_once<F>(future: &mut F) -> Option<F::Output>
where
    F: std::future::Future + Unpin,
{
    tokio::select! {
        biased;
        output = future => Some(output),
        () = std::future::ready(()) => None,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
