use text_stream::TextSink;

use crate::writer::BufferedWriter;

/// Lets a [`TextStream`](text_stream::TextStream) stream its fragments
/// straight into the writer.
impl TextSink for BufferedWriter {
    fn write_text(&mut self, text: &str) {
        self.write(text);
    }
}
