/// Destination for the fragments of a sink-bound [`TextStream`](crate::TextStream).
///
/// Each call to [`TextStream::write`](crate::TextStream::write) or
/// [`TextStream::append`](crate::TextStream::append) forwards exactly one
/// string.
pub trait TextSink {
    /// Accepts one text fragment.
    fn write_text(&mut self, text: &str);
}

impl TextSink for String {
    fn write_text(&mut self, text: &str) {
        self.push_str(text);
    }
}

impl<F> TextSink for F
where
    F: FnMut(&str),
{
    fn write_text(&mut self, text: &str) {
        self(text);
    }
}
