//! Renderer: serialize a framebuffer to a terminal stream.
//!
//! A frame is emitted row by row - per cell, the style escapes that cell
//! requires, then the Braille glyph for its pattern. Escape volume is kept
//! down by tracking the last-emitted value of each style slot across the
//! frame and skipping any assertion that would have no visible effect
//! ([`StyleState`]). The frame is bracketed by full-reset escapes so the
//! stream is left neutral no matter what was drawn.
//!
//! The renderer never mutates the buffer; its only side effect is writing
//! to the output sink.

use crate::buffer::{Cell, Framebuffer, Style};
use std::io::{self, Write};

/// Last-emitted value of each style slot within the current frame.
///
/// Deduplication cascades: slot 1 is compared against its own previous
/// value only; slot 2 also against the (possibly just-updated) slot-1
/// value; slot 3 against all three. A slot's previous value advances only
/// when it is actually emitted. This "claim stack" suppresses re-assertion
/// of an attribute that an earlier slot already put on the wire, which
/// independent per-slot diffing would re-emit.
#[derive(Debug, Clone)]
pub struct StyleState {
    prev1: Style,
    prev2: Style,
    prev3: Style,
}

impl Default for StyleState {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleState {
    /// Fresh state: all slots at the no-style sentinel, matching a stream
    /// that just saw a full reset.
    pub const fn new() -> Self {
        Self {
            prev1: Style::NONE,
            prev2: Style::NONE,
            prev3: Style::NONE,
        }
    }

    /// Emit the escapes `cell` requires given what has already been
    /// asserted this frame, and advance the state.
    pub fn apply<W: Write + ?Sized>(&mut self, cell: &Cell, out: &mut W) -> io::Result<()> {
        let (s1, s2, s3) = cell.styles();

        if s1 != self.prev1 {
            emit_style(out, s1)?;
            self.prev1 = s1;
        }

        if s2 != self.prev2 && s2 != self.prev1 {
            emit_style(out, s2)?;
            self.prev2 = s2;
        }

        if s3 != self.prev3 && s3 != self.prev2 && s3 != self.prev1 {
            emit_style(out, s3)?;
            self.prev3 = s3;
        }

        Ok(())
    }
}

/// Write one style escape: `ESC [ <code> m`.
#[inline]
fn emit_style<W: Write + ?Sized>(out: &mut W, style: Style) -> io::Result<()> {
    write!(out, "\x1b[{}m", style.code())
}

/// Serialize a full frame to `out`.
///
/// One line per cell row, each terminated by a newline; a full-reset
/// escape before the first cell and after the last row. Style state is
/// initialized fresh per call, so emitting an unchanged buffer twice
/// produces identical output.
pub fn emit<W: Write + ?Sized>(buffer: &Framebuffer, out: &mut W) -> io::Result<()> {
    let mut state = StyleState::new();
    let mut utf8 = [0u8; 4];

    out.write_all(b"\x1b[0m")?;

    for row in buffer.rows() {
        for cell in row {
            state.apply(cell, out)?;
            out.write_all(cell.glyph().encode_utf8(&mut utf8).as_bytes())?;
        }
        out.write_all(b"\n")?;
    }

    out.write_all(b"\x1b[0m")
}

/// Move the cursor up by the buffer's cell height and back to column 1,
/// so the next [`emit`] redraws in place without scrolling.
pub fn home<W: Write + ?Sized>(buffer: &Framebuffer, out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[{}A\x1b[G", buffer.height())
}
