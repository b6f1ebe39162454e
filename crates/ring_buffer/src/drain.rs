use std::ops::Deref;

use crate::ring::RingBuffer;

/// Bytes extracted from a [`RingBuffer`] by a transactional drain.
///
/// A `Drained` value is either consumed (the bytes were delivered, see
/// [`Drained::into_vec`]) or handed back with [`Drained::revert`]. Reverting
/// moves the bytes to the *front* of the buffer so they precede anything that
/// was appended after the drain.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use = "drained bytes are lost unless delivered or reverted"]
pub struct Drained {
    bytes: Vec<u8>,
}

impl Drained {
    pub(crate) const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the drained bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of drained bytes. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: empty drains are reported as `None` by the buffer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the drain, keeping the bytes out of the buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Aborts the drain and restores the bytes ahead of whatever `buffer`
    /// currently holds.
    ///
    /// After the call the buffer contents are `drained ++ interim`, where
    /// `interim` is everything appended since the drain.
    pub fn revert(self, buffer: &mut RingBuffer) {
        buffer.restore_front(&self.bytes);
    }
}

impl Deref for Drained {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl AsRef<[u8]> for Drained {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
