/// Behaviour of [`RingBuffer::append`](crate::RingBuffer::append) when the
/// staged bytes would exceed the current capacity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverflowPolicy {
    /// Reallocate the backing storage (at least doubling it) so the append
    /// always succeeds.
    #[default]
    Grow,
    /// Fail the append with [`BufferError::Overflow`](crate::BufferError::Overflow)
    /// and leave the buffer untouched.
    Reject,
}

impl OverflowPolicy {
    /// Returns `true` when appends may reallocate the buffer.
    #[must_use]
    pub const fn grows(self) -> bool {
        matches!(self, Self::Grow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_grows() {
        assert_eq!(OverflowPolicy::default(), OverflowPolicy::Grow);
        assert!(OverflowPolicy::Grow.grows());
        assert!(!OverflowPolicy::Reject.grows());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn policy_serializes_in_snake_case() {
        let json = serde_json::to_string(&OverflowPolicy::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
        let parsed: OverflowPolicy = serde_json::from_str("\"grow\"").unwrap();
        assert_eq!(parsed, OverflowPolicy::Grow);
    }
}
