//! Error types for buffer operations.

/// Errors reported by [`RingBuffer`](crate::RingBuffer) appends.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BufferError {
    /// The append does not fit and the buffer rejects overflowing writes.
    #[error("ring buffer overflow: {requested} bytes requested, {available} bytes available")]
    Overflow {
        /// Number of bytes the caller attempted to append.
        requested: usize,
        /// Free space left in the buffer at the time of the append.
        available: usize,
    },
}
