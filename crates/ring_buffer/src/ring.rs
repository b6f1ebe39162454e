use std::fmt;

use crate::drain::Drained;
use crate::error::BufferError;
use crate::policy::OverflowPolicy;

/// Capacity used by [`RingBuffer::new`] (16 KiB).
pub const DEFAULT_CAPACITY: usize = 16 * 1024;

/// Smallest allocation made when a growing buffer has to reallocate.
const MIN_GROWTH: usize = 64;

/// Circular FIFO byte buffer.
///
/// Bytes live in a fixed boxed slice addressed by a `head` offset and a
/// length, so appends and drains never shift memory. The buffer only
/// reallocates when an append exceeds the capacity under
/// [`OverflowPolicy::Grow`], or when [`Drained::revert`] restores bytes that
/// no longer fit.
pub struct RingBuffer {
    storage: Box<[u8]>,
    head: usize,
    len: usize,
    policy: OverflowPolicy,
}

impl Default for RingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RingBuffer {
    /// Creates a growing buffer with [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a growing buffer with the given initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_policy(capacity, OverflowPolicy::Grow)
    }

    /// Creates a buffer with the given capacity and overflow policy.
    #[must_use]
    pub fn with_policy(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            storage: vec![0; capacity].into_boxed_slice(),
            head: 0,
            len: 0,
            policy,
        }
    }

    /// Returns the number of staged bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no bytes are staged.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the backing storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns the number of bytes that fit without reallocating.
    #[must_use]
    pub fn available(&self) -> usize {
        self.capacity() - self.len
    }

    /// Returns the overflow policy.
    #[must_use]
    pub const fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Discards every staged byte.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Appends `bytes` behind the currently staged data.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Overflow`] when the bytes do not fit and the
    /// policy is [`OverflowPolicy::Reject`]. The buffer is left unchanged.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        if bytes.is_empty() {
            return Ok(());
        }

        if bytes.len() > self.available() {
            match self.policy {
                OverflowPolicy::Grow => self.grow(bytes.len()),
                OverflowPolicy::Reject => {
                    return Err(BufferError::Overflow {
                        requested: bytes.len(),
                        available: self.available(),
                    });
                }
            }
        }

        let tail = self.wrap(self.head + self.len);
        self.copy_in(tail, bytes);
        self.len += bytes.len();
        Ok(())
    }

    /// Extracts every staged byte.
    ///
    /// Returns `None` when the buffer is empty.
    pub fn drain(&mut self) -> Option<Drained> {
        self.drain_up_to(usize::MAX)
    }

    /// Extracts at most `max` bytes from the front of the buffer.
    ///
    /// Returns `None` when the buffer is empty or `max` is zero.
    pub fn drain_up_to(&mut self, max: usize) -> Option<Drained> {
        let count = self.len.min(max);
        if count == 0 {
            return None;
        }

        let mut bytes = Vec::with_capacity(count);
        let first = count.min(self.capacity() - self.head);
        bytes.extend_from_slice(&self.storage[self.head..self.head + first]);
        bytes.extend_from_slice(&self.storage[..count - first]);

        self.len -= count;
        self.head = if self.len == 0 {
            0
        } else {
            self.wrap(self.head + count)
        };

        Some(Drained::new(bytes))
    }

    /// Places `bytes` in front of the staged data, growing regardless of the
    /// policy: these bytes were accepted once already.
    pub(crate) fn restore_front(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        if bytes.len() > self.available() {
            self.grow(bytes.len());
        }

        let capacity = self.capacity();
        let head = (self.head + capacity - bytes.len()) % capacity;
        self.copy_in(head, bytes);
        self.head = head;
        self.len += bytes.len();
    }

    fn wrap(&self, index: usize) -> usize {
        let capacity = self.capacity();
        if capacity == 0 { 0 } else { index % capacity }
    }

    /// Copies `bytes` into storage starting at `start`, wrapping at the end.
    /// The caller guarantees there is room.
    fn copy_in(&mut self, start: usize, bytes: &[u8]) {
        let first = bytes.len().min(self.capacity() - start);
        self.storage[start..start + first].copy_from_slice(&bytes[..first]);
        self.storage[..bytes.len() - first].copy_from_slice(&bytes[first..]);
    }

    /// Reallocates so at least `additional` more bytes fit, unrolling the
    /// staged data to the start of the new storage.
    fn grow(&mut self, additional: usize) {
        let required = self.len + additional;
        let new_capacity = required.max(self.capacity() * 2).max(MIN_GROWTH);

        let mut storage = vec![0; new_capacity].into_boxed_slice();
        let first = self.len.min(self.capacity() - self.head);
        storage[..first].copy_from_slice(&self.storage[self.head..self.head + first]);
        storage[first..self.len].copy_from_slice(&self.storage[..self.len - first]);

        self.storage = storage;
        self.head = 0;
    }
}
