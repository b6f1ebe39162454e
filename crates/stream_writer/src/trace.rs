//! Tracing hooks for the drain-and-send pipeline.
//!
//! Every function is compiled to an inline no-op unless the `tracing`
//! feature is enabled.

#[cfg(feature = "tracing")]
const WRITER_TARGET: &str = "textstream::writer";

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_submit(len: usize, saturated: bool) {
    tracing::trace!(target: WRITER_TARGET, len, saturated, "writer: submitted chunk");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_submit(_len: usize, _saturated: bool) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_deferred(len: usize) {
    tracing::debug!(
        target: WRITER_TARGET,
        len,
        "writer: sink saturated, chunk returned to buffer"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_deferred(_len: usize) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_failed(error: &crate::WriteError) {
    tracing::warn!(target: WRITER_TARGET, %error, "writer: submission failed");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_failed(_error: &crate::WriteError) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_rejected(error: &crate::WriteError) {
    tracing::warn!(target: WRITER_TARGET, %error, "writer: write rejected before staging");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_rejected(_error: &crate::WriteError) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_ready(buffered: usize) {
    tracing::debug!(target: WRITER_TARGET, buffered, "writer: sink ready");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_ready(_buffered: usize) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_write_after_close(len: usize) {
    tracing::debug!(target: WRITER_TARGET, len, "writer: write after close");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_write_after_close(_len: usize) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_close_pending(buffered: usize) {
    tracing::debug!(
        target: WRITER_TARGET,
        buffered,
        "writer: close waiting for sink readiness"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_close_pending(_buffered: usize) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_detached(buffered: usize) {
    tracing::debug!(
        target: WRITER_TARGET,
        buffered,
        "writer: handles dropped, deferred bytes wait for sink readiness"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_detached(_buffered: usize) {}

#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_shutdown(buffered: usize) {
    tracing::debug!(target: WRITER_TARGET, buffered, "writer: worker stopped");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_shutdown(_buffered: usize) {}
