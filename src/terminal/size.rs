//! Terminal size query, in dot units.

use std::io;

/// Dot resolution of the attached terminal.
///
/// Leaves a one-cell margin on each axis (the last column would force a
/// wrap, the last row a scroll) and converts cells to dots: 2 per column,
/// 4 per row.
///
/// # Errors
///
/// Returns an error when no terminal is attached or the size query fails.
pub fn dot_resolution() -> io::Result<(u16, u16)> {
    let (cols, rows) = crossterm::terminal::size()?;
    Ok((cols.saturating_sub(1) * 2, rows.saturating_sub(1) * 4))
}
