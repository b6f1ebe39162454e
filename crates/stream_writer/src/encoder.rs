//! Text-to-bytes encoders.

use std::borrow::Cow;

/// Error returned by an [`Encoder`] that cannot represent its input.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{encoding} cannot represent {character:?} at byte offset {offset}")]
pub struct EncodeError {
    encoding: &'static str,
    character: char,
    offset: usize,
}

impl EncodeError {
    /// Creates an error for `character` found at byte `offset` of the input.
    #[must_use]
    pub const fn unrepresentable(encoding: &'static str, character: char, offset: usize) -> Self {
        Self {
            encoding,
            character,
            offset,
        }
    }

    /// Name of the encoding that failed.
    #[must_use]
    pub const fn encoding(&self) -> &'static str {
        self.encoding
    }

    /// The character that could not be encoded.
    #[must_use]
    pub const fn character(&self) -> char {
        self.character
    }

    /// Byte offset of the character within the input string.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// Pure, synchronous mapping from text to bytes.
///
/// The writer invokes the encoder on the caller's thread inside
/// [`BufferedWriter::write`](crate::BufferedWriter::write); encoders must not
/// keep state between calls.
pub trait Encoder: Send + Sync {
    /// Encodes `text`, borrowing it when no transformation is needed.
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodeError>;
}

/// UTF-8 encoder; never fails and never copies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Utf8Encoder;

impl Encoder for Utf8Encoder {
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodeError> {
        Ok(Cow::Borrowed(text.as_bytes()))
    }
}

/// ISO-8859-1 encoder; fails on code points above U+00FF.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Latin1Encoder;

impl Encoder for Latin1Encoder {
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodeError> {
        if text.is_ascii() {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }

        let mut bytes = Vec::with_capacity(text.len());
        for (offset, character) in text.char_indices() {
            let byte = u8::try_from(u32::from(character))
                .map_err(|_| EncodeError::unrepresentable("ISO-8859-1", character, offset))?;
            bytes.push(byte);
        }
        Ok(Cow::Owned(bytes))
    }
}

impl<F> Encoder for F
where
    F: Fn(&str) -> Vec<u8> + Send + Sync,
{
    fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, EncodeError> {
        Ok(Cow::Owned(self(text)))
    }
}
