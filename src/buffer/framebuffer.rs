//! Framebuffer: A grid of cells addressed in dot coordinates.
//!
//! The grid uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order. All dot-level operations treat
//! out-of-bounds coordinates as silent no-ops so that drivers can probe
//! neighbor dots near the edges without guarding every call.

use super::cell::{Cell, Pattern, Style};
use super::dot::{resolve, DotAddress, DotPoint};
use std::collections::TryReserveError;
use thiserror::Error;

/// Failure to obtain backing storage for a framebuffer grid.
///
/// Construction is the only fallible core operation; on failure no
/// partially-initialized buffer is observable.
#[derive(Debug, Error)]
#[error("failed to allocate framebuffer storage for {cells} cells")]
pub struct AllocationError {
    /// Number of cells the requested grid needed.
    pub cells: usize,
    source: TryReserveError,
}

/// A dot-addressable grid of Braille cells.
///
/// Dimensions are fixed in cells at construction, derived from the
/// requested dot resolution by ceiling division (2 dots per cell
/// horizontally, 4 vertically). The grid size never changes over the
/// buffer's lifetime; create a new buffer to resize.
///
/// Dot coordinates are signed and unbounded; cell storage is exclusively
/// owned and never shared between buffers.
#[derive(Clone)]
pub struct Framebuffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Grid width in cells.
    width: u16,
    /// Grid height in cells.
    height: u16,
}

impl Framebuffer {
    /// Create a grid covering `dot_width × dot_height` dots, every cell
    /// filled with `fill` and empty style slots.
    ///
    /// Cell dimensions round up: `new(3, 5, …)` yields a 2×2 grid.
    pub fn new(dot_width: u16, dot_height: u16, fill: Pattern) -> Result<Self, AllocationError> {
        let width = dot_width.div_ceil(2);
        let height = dot_height.div_ceil(4);
        let size = usize::from(width) * usize::from(height);

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(size)
            .map_err(|source| AllocationError { cells: size, source })?;
        cells.resize(size, Cell::new(fill));

        log::debug!("framebuffer created: {width}x{height} cells ({size} total)");

        Ok(Self { cells, width, height })
    }

    /// Grid width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Addressable width in dots.
    #[inline]
    pub const fn dot_width(&self) -> u32 {
        self.width as u32 * 2
    }

    /// Addressable height in dots.
    #[inline]
    pub const fn dot_height(&self) -> u32 {
        self.height as u32 * 4
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no cells (a zero-dot construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The underlying cell slice, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert a cell address to a linear index, if in bounds.
    #[inline]
    fn index_of(&self, col: i32, row: i32) -> Option<usize> {
        if col >= 0 && col < i32::from(self.width) && row >= 0 && row < i32::from(self.height) {
            Some(row as usize * usize::from(self.width) + col as usize)
        } else {
            None
        }
    }

    /// The cell at `(col, row)` in cell coordinates.
    #[inline]
    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        self.index_of(i32::from(col), i32::from(row)).map(|i| &self.cells[i])
    }

    /// Reset every cell's pattern to `fill` and all style slots to the
    /// no-style sentinel, in place.
    pub fn clear(&mut self, fill: Pattern) {
        self.cells.fill(Cell::new(fill));
    }

    /// Light (`on = true`) or extinguish (`on = false`) the dot at `(x, y)`.
    ///
    /// Out-of-bounds coordinates are silently ignored.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, on: bool) {
        let DotAddress { col, row, mask } = resolve(x, y);
        if let Some(idx) = self.index_of(col, row) {
            if on {
                self.cells[idx].set_dots(mask);
            } else {
                self.cells[idx].clear_dots(mask);
            }
        }
    }

    /// Whether the dot at `(x, y)` is lit. Out of bounds reads as unlit.
    #[inline]
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        let DotAddress { col, row, mask } = resolve(x, y);
        self.index_of(col, row)
            .is_some_and(|idx| self.cells[idx].has_dots(mask))
    }

    /// Overwrite the style slots of the cell containing dot `(x, y)`.
    ///
    /// Styles are cell-granular: every dot of that cell renders with these
    /// attributes. No-op if the dot is out of bounds.
    #[inline]
    pub fn set_cell_styles(&mut self, x: i32, y: i32, s1: Style, s2: Style, s3: Style) {
        let DotAddress { col, row, .. } = resolve(x, y);
        if let Some(idx) = self.index_of(col, row) {
            self.cells[idx].set_styles(s1, s2, s3);
        }
    }

    /// Resolve `(x, y)` against this buffer, borrowing the addressed cell
    /// when it exists.
    ///
    /// This is the composition entry point: [`blit`] calls it once per
    /// destination dot and hands the result to the transfer closure.
    ///
    /// [`blit`]: crate::compose::blit
    #[inline]
    pub fn dot_at_mut(&mut self, x: i32, y: i32) -> DotPoint<'_> {
        let DotAddress { col, row, mask } = resolve(x, y);
        let cell = self.index_of(col, row).map(|idx| &mut self.cells[idx]);
        DotPoint { x, y, col, row, mask, cell }
    }

    /// Iterate over cell rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width).max(1))
    }

    /// Swap the contents of two buffers.
    ///
    /// This is O(1) - just pointer swaps. Drivers use it to flip a
    /// simulation's current/next buffer pair.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.cells, &mut other.cells);
        std::mem::swap(&mut self.width, &mut other.width);
        std::mem::swap(&mut self.height, &mut other.height);
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dots", &(self.dot_width(), self.dot_height()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fb(dot_w: u16, dot_h: u16) -> Framebuffer {
        Framebuffer::new(dot_w, dot_h, Pattern::empty()).unwrap()
    }

    #[test]
    fn test_dimensions_round_up() {
        let buffer = fb(3, 5);
        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_exact_dimensions() {
        let buffer = fb(160, 96);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.dot_width(), 160);
        assert_eq!(buffer.dot_height(), 96);
    }

    #[test]
    fn test_zero_sized_grid() {
        let buffer = fb(0, 0);
        assert!(buffer.is_empty());
        assert!(!buffer.is_set(0, 0));
    }

    #[test]
    fn test_plot_isset_roundtrip() {
        let mut buffer = fb(16, 16);
        for (x, y) in [(0, 0), (1, 3), (7, 2), (15, 15)] {
            buffer.plot(x, y, true);
            assert!(buffer.is_set(x, y), "dot ({x}, {y}) should be lit");
            buffer.plot(x, y, false);
            assert!(!buffer.is_set(x, y), "dot ({x}, {y}) should be off");
        }
    }

    #[test]
    fn test_plot_out_of_bounds_is_noop() {
        let mut buffer = fb(8, 8);
        buffer.plot(-1, 0, true);
        buffer.plot(0, -1, true);
        buffer.plot(8, 0, true);
        buffer.plot(0, 8, true);
        assert!(!buffer.is_set(-1, 0));
        assert!(!buffer.is_set(0, -1));
        assert!(!buffer.is_set(8, 0));
        assert!(!buffer.is_set(0, 8));
        assert!(buffer.cells().iter().all(|c| c.pattern().is_empty()));
    }

    #[test]
    fn test_plot_neighbors_in_same_cell() {
        let mut buffer = fb(8, 8);
        buffer.plot(0, 0, true);
        buffer.plot(1, 0, true);
        buffer.plot(0, 1, true);
        let cell = buffer.cell(0, 0).unwrap();
        assert_eq!(cell.pattern(), Pattern::DOT_1 | Pattern::DOT_4 | Pattern::DOT_2);
    }

    #[test]
    fn test_clear_fill_pattern_bit_mapping() {
        let fill = Pattern::from_bits_retain(0b1010_0101);
        let mut buffer = fb(8, 8);
        buffer.clear(fill);

        // is_set at each in-cell position reflects the corresponding fill bit.
        for y in 0..4 {
            for x in 0..2 {
                let mask = resolve(x, y).mask;
                let expected = fill.contains(mask);
                assert_eq!(buffer.is_set(x, y), expected, "dot ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_clear_resets_styles() {
        let mut buffer = fb(8, 8);
        buffer.set_cell_styles(0, 0, Style::FG_RED, Style::BOLD, Style::NONE);
        buffer.clear(Pattern::empty());
        let cell = buffer.cell(0, 0).unwrap();
        assert_eq!(cell.styles(), (Style::NONE, Style::NONE, Style::NONE));
    }

    #[test]
    fn test_set_cell_styles_is_cell_granular() {
        let mut buffer = fb(8, 8);
        // Two dots in the same cell: styling via either addresses the same slots.
        buffer.set_cell_styles(0, 0, Style::FG_GREEN, Style::NONE, Style::NONE);
        buffer.set_cell_styles(1, 3, Style::FG_RED, Style::BOLD, Style::NONE);
        let cell = buffer.cell(0, 0).unwrap();
        assert_eq!(cell.style1(), Style::FG_RED);
        assert_eq!(cell.style2(), Style::BOLD);
    }

    #[test]
    fn test_set_cell_styles_out_of_bounds_is_noop() {
        let mut buffer = fb(8, 8);
        buffer.set_cell_styles(-3, 100, Style::FG_RED, Style::NONE, Style::NONE);
        assert!(buffer
            .cells()
            .iter()
            .all(|c| c.styles() == (Style::NONE, Style::NONE, Style::NONE)));
    }

    #[test]
    fn test_dot_at_mut_in_bounds() {
        let mut buffer = fb(8, 8);
        let mut pt = buffer.dot_at_mut(3, 2);
        assert!(pt.in_bounds());
        assert_eq!((pt.col, pt.row), (1, 0));
        pt.set();
        assert!(buffer.is_set(3, 2));
    }

    #[test]
    fn test_dot_at_mut_out_of_bounds() {
        let mut buffer = fb(8, 8);
        let mut pt = buffer.dot_at_mut(-5, 2);
        assert!(!pt.in_bounds());
        pt.set();
        pt.set_styles(Style::FG_RED, Style::NONE, Style::NONE);
        assert!(!pt.is_set());
    }

    #[test]
    fn test_swap() {
        let mut a = fb(8, 8);
        let mut b = fb(8, 8);
        a.plot(0, 0, true);
        b.plot(2, 2, true);

        a.swap(&mut b);

        assert!(!a.is_set(0, 0));
        assert!(a.is_set(2, 2));
        assert!(b.is_set(0, 0));
    }

    #[test]
    fn test_rows_iteration() {
        let buffer = fb(8, 8);
        let rows: Vec<_> = buffer.rows().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 4));
    }
}
