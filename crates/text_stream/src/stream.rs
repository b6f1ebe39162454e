mod guard;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::TextStreamError;
use crate::options::TextStreamOptions;
use crate::sink::TextSink;

use self::guard::DepthGuard;

enum Output {
    Buffer(String),
    Sink(Box<dyn TextSink>),
}

/// State shared by a root stream and every child scope created from it.
struct Root {
    indentation_size: usize,
    depth: Cell<usize>,
    at_line_start: Cell<bool>,
    output: RefCell<Output>,
}

/// Indentation-aware text builder.
///
/// All methods take `&self`, so closures passed to
/// [`indent_block`](Self::indent_block) and [`write_block`](Self::write_block)
/// can keep writing through the same stream. Child scopes created with
/// [`child`](Self::child) share the root's depth counter, indentation width
/// and output.
///
/// Writing from inside the stream's own [`TextSink`] is not supported and
/// panics.
#[derive(Clone)]
pub struct TextStream {
    root: Rc<Root>,
}

impl Default for TextStream {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStream")
            .field("indentation_size", &self.root.indentation_size)
            .field("depth", &self.root.depth.get())
            .field("bound_to_sink", &self.is_bound_to_sink())
            .finish()
    }
}

impl TextStream {
    /// Creates a buffering stream with the default indentation width.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(TextStreamOptions::new())
    }

    /// Creates a buffering stream.
    #[must_use]
    pub fn with_options(options: TextStreamOptions) -> Self {
        Self::from_output(Output::Buffer(String::new()), options)
    }

    /// Creates a stream that forwards every fragment to `sink`.
    pub fn with_sink<S>(sink: S, options: TextStreamOptions) -> Self
    where
        S: TextSink + 'static,
    {
        Self::from_output(Output::Sink(Box::new(sink)), options)
    }

    fn from_output(output: Output, options: TextStreamOptions) -> Self {
        Self {
            root: Rc::new(Root {
                indentation_size: options.indentation_size(),
                depth: Cell::new(0),
                at_line_start: Cell::new(true),
                output: RefCell::new(output),
            }),
        }
    }

    /// Creates a child scope that writes into this stream's output at this
    /// stream's depth, using the root's indentation width.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            root: Rc::clone(&self.root),
        }
    }

    /// Returns the number of spaces per nesting level.
    #[must_use]
    pub fn indentation_size(&self) -> usize {
        self.root.indentation_size
    }

    /// Returns the current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth.get()
    }

    /// Returns `true` when output is forwarded to a sink.
    #[must_use]
    pub fn is_bound_to_sink(&self) -> bool {
        matches!(*self.root.output.borrow(), Output::Sink(_))
    }

    /// Writes `text`, indenting every line it starts, blank lines included.
    pub fn write(&self, text: &str) {
        let indented = self.indent(text);
        self.append(&indented);
    }

    /// Writes `start`, runs `block` one level deeper, then writes `end`.
    pub fn write_block<F>(&self, start: &str, block: F, end: &str)
    where
        F: FnOnce(),
    {
        self.write(start);
        self.indent_block(block);
        self.write(end);
    }

    /// Runs `block` with the depth increased by one.
    ///
    /// The depth is restored when `block` returns or unwinds.
    pub fn indent_block<F, R>(&self, block: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = DepthGuard::enter(&self.root.depth);
        block()
    }

    /// Appends `text` verbatim, without indentation.
    pub fn append(&self, text: &str) {
        if text.is_empty() {
            return;
        }

        self.root.at_line_start.set(text.ends_with('\n'));
        match &mut *self.root.output.borrow_mut() {
            Output::Buffer(contents) => contents.push_str(text),
            Output::Sink(sink) => sink.write_text(text),
        }
    }

    /// Returns the buffered text and clears the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`TextStreamError::BoundToSink`] when the stream forwards its
    /// output to a sink.
    pub fn value(&self) -> Result<String, TextStreamError> {
        match &mut *self.root.output.borrow_mut() {
            Output::Buffer(contents) => Ok(std::mem::take(contents)),
            Output::Sink(_) => Err(TextStreamError::BoundToSink),
        }
    }

    fn indent(&self, text: &str) -> String {
        let padding = self.root.indentation_size * self.root.depth.get();
        if padding == 0 {
            return text.to_owned();
        }

        let mut indented = String::with_capacity(text.len() + padding);
        let mut at_line_start = self.root.at_line_start.get();
        for line in text.split_inclusive('\n') {
            if at_line_start {
                indented.extend(std::iter::repeat_n(' ', padding));
            }
            indented.push_str(line);
            at_line_start = line.ends_with('\n');
        }
        indented
    }
}

impl fmt::Write for TextStream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
