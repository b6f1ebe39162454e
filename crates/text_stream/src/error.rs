//! Error types for the text builder.

/// Misuse of a [`TextStream`](crate::TextStream).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TextStreamError {
    /// [`TextStream::value`](crate::TextStream::value) was called on a stream
    /// whose output goes to a sink.
    #[error("cannot get the value of a text stream that writes to a sink")]
    BoundToSink,
}
