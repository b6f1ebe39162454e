//! Failures published on the writer's error channel.

use std::io;

use ring_buffer::BufferError;

use crate::encoder::EncodeError;

/// A failure observed by the asynchronous write pipeline.
///
/// Values are broadcast as `Arc<WriteError>` to every receiver returned by
/// [`BufferedWriter::subscribe`](crate::BufferedWriter::subscribe). Sink
/// failures leave the affected bytes staged at the front of the buffer, so
/// the next drain step retries them.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The sink's completion reported an error for a submitted chunk.
    #[error("sink failed to accept {len} bytes: {source}")]
    Sink {
        /// Length of the chunk that was restored to the buffer.
        len: usize,
        /// The error supplied by the sink.
        #[source]
        source: io::Error,
    },

    /// The sink dropped the completion without reporting an outcome.
    #[error("sink abandoned a {len} byte submission without completing it")]
    Abandoned {
        /// Length of the chunk that was restored to the buffer.
        len: usize,
    },

    /// Text input could not be encoded; nothing was staged for that write.
    #[error("failed to encode text input: {0}")]
    Encode(#[from] EncodeError),

    /// The staging buffer refused the write; nothing was staged for it.
    #[error("failed to stage write: {0}")]
    Buffer(#[from] BufferError),
}

impl WriteError {
    /// Returns the number of bytes that were restored to the buffer, if any.
    #[must_use]
    pub const fn restored_len(&self) -> Option<usize> {
        match self {
            Self::Sink { len, .. } | Self::Abandoned { len } => Some(*len),
            Self::Encode(_) | Self::Buffer(_) => None,
        }
    }

    /// Returns the underlying sink error, if this failure came from the sink.
    #[must_use]
    pub const fn sink_error(&self) -> Option<&io::Error> {
        match self {
            Self::Sink { source, .. } => Some(source),
            _ => None,
        }
    }
}
