//! Writer configuration.

use std::num::NonZeroUsize;

use ring_buffer::OverflowPolicy;

/// Default staging buffer capacity (16 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 16 * 1024;

/// Default number of failures retained for slow error-channel subscribers.
pub const DEFAULT_ERROR_CHANNEL_CAPACITY: usize = 64;

/// Builder-style configuration for [`BufferedWriter`](crate::BufferedWriter).
///
/// ```
/// use std::num::NonZeroUsize;
/// use stream_writer::{OverflowPolicy, WriterConfig};
///
/// let config = WriterConfig::new()
///     .with_buffer_capacity(4096)
///     .with_overflow_policy(OverflowPolicy::Reject)
///     .with_max_chunk_len(NonZeroUsize::new(1024));
/// assert_eq!(config.buffer_capacity(), 4096);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterConfig {
    buffer_capacity: usize,
    overflow_policy: OverflowPolicy,
    max_chunk_len: Option<NonZeroUsize>,
    error_channel_capacity: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl WriterConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            overflow_policy: OverflowPolicy::Grow,
            max_chunk_len: None,
            error_channel_capacity: DEFAULT_ERROR_CHANNEL_CAPACITY,
        }
    }

    /// Sets the initial capacity of the staging buffer.
    #[must_use]
    pub const fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Sets what happens when a write does not fit in the staging buffer.
    #[must_use]
    pub const fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Caps the size of each chunk handed to the sink.
    ///
    /// `None` (the default) submits everything staged in one chunk.
    #[must_use]
    pub const fn with_max_chunk_len(mut self, max: Option<NonZeroUsize>) -> Self {
        self.max_chunk_len = max;
        self
    }

    /// Sets how many failures the error channel retains per subscriber.
    ///
    /// Values below one are raised to one.
    #[must_use]
    pub fn with_error_channel_capacity(mut self, capacity: usize) -> Self {
        self.error_channel_capacity = capacity.max(1);
        self
    }

    /// Initial staging buffer capacity.
    #[must_use]
    pub const fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Overflow policy of the staging buffer.
    #[must_use]
    pub const fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow_policy
    }

    /// Maximum chunk size submitted to the sink, if bounded.
    #[must_use]
    pub const fn max_chunk_len(&self) -> Option<NonZeroUsize> {
        self.max_chunk_len
    }

    /// Error channel capacity.
    #[must_use]
    pub const fn error_channel_capacity(&self) -> usize {
        self.error_channel_capacity
    }

    pub(crate) fn chunk_limit(&self) -> usize {
        self.max_chunk_len.map_or(usize::MAX, NonZeroUsize::get)
    }
}
