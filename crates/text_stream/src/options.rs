/// Indentation width used when none is configured.
pub const DEFAULT_INDENTATION_SIZE: usize = 4;

/// Construction options for a root [`TextStream`](crate::TextStream).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextStreamOptions {
    indentation_size: Option<usize>,
}

impl TextStreamOptions {
    /// Creates options with the default indentation width.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            indentation_size: None,
        }
    }

    /// Sets the number of spaces added per nesting level.
    #[must_use]
    pub const fn with_indentation_size(mut self, size: usize) -> Self {
        self.indentation_size = Some(size);
        self
    }

    /// Returns the effective indentation width.
    #[must_use]
    pub const fn indentation_size(&self) -> usize {
        match self.indentation_size {
            Some(size) => size,
            None => DEFAULT_INDENTATION_SIZE,
        }
    }
}
