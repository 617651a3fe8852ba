//! Append-only text sink with indentation

use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Line-oriented writer that prefixes every line with the current indentation.
///
/// Generic over any [`fmt::Write`] sink; a `String` by default.
#[derive(Debug, Default)]
pub struct DiagramWriter<W: Write = String> {
    sink: W,
    depth: usize,
}

impl DiagramWriter<String> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W: Write> DiagramWriter<W> {
    pub fn with_sink(sink: W) -> Self {
        Self { sink, depth: 0 }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write one line followed by a newline
    pub fn line(&mut self, text: impl AsRef<str>) -> fmt::Result {
        self.write_indent()?;
        self.sink.write_str(text.as_ref())?;
        self.sink.write_char('\n')
    }

    /// Write one line with no trailing newline
    pub fn last_line(&mut self, text: impl AsRef<str>) -> fmt::Result {
        self.write_indent()?;
        self.sink.write_str(text.as_ref())
    }

    /// Write `opening`, then indent until the matching [`close`](Self::close)
    pub fn open(&mut self, opening: impl AsRef<str>) -> fmt::Result {
        self.line(opening)?;
        self.indent();
        Ok(())
    }

    pub fn close(&mut self) -> fmt::Result {
        self.dedent();
        self.line("}")
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_indent(&mut self) -> fmt::Result {
        for _ in 0..self.depth {
            self.sink.write_str(INDENT)?;
        }
        Ok(())
    }
}
