//! `OutputBuffer`: Single-syscall output buffer for escape sequences.

use crate::buffer::Style;
use std::io::{self, Write};

/// Pre-allocated buffer for assembling a frame's bytes.
///
/// Frame output is accumulated here, then flushed to the terminal in a
/// single `write()` syscall to prevent flickering mid-frame. Implements
/// [`io::Write`], so [`crate::render::emit`] can target it directly.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal frame (8KB).
    pub fn new() -> Self {
        Self::with_capacity(8192)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write one style escape: `ESC [ <code> m`.
    #[inline]
    pub fn sgr(&mut self, style: Style) {
        let _ = write!(self.data, "\x1b[{}m", style.code());
    }

    /// Reset all display attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Move the cursor up `rows` lines.
    #[inline]
    pub fn cursor_up(&mut self, rows: u16) {
        let _ = write!(self.data, "\x1b[{rows}A");
    }

    /// Move the cursor to the start of the current line.
    #[inline]
    pub fn cursor_col_start(&mut self) {
        self.data.extend_from_slice(b"\x1b[G");
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
