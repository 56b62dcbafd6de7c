//! # Dotfield
//!
//! A dot-addressable Braille framebuffer for terminal graphics.
//!
//! Dotfield turns a character terminal into a dot matrix: every cell of a
//! [`Framebuffer`] renders as one Unicode Braille glyph, giving a 2×4
//! dot sub-grid per character position plus up to three SGR style
//! attributes per cell.
//!
//! ## Core Concepts
//!
//! - **Dot addressing**: plot/query individual dots with signed, unbounded
//!   coordinates; out-of-bounds access is a silent no-op, so simulations can
//!   probe past the edges freely
//! - **Run-compressed rendering**: [`render::emit`] serializes a frame with
//!   cascading style-escape deduplication; [`render::home`] enables
//!   in-place redraw
//! - **Blit composition**: [`compose::blit`] scales an arbitrary pixel
//!   source onto the grid through a caller-supplied transfer closure
//!
//! ## Example
//!
//! ```rust
//! use dotfield::{render, Framebuffer, Pattern};
//!
//! // A 16x16-dot canvas (8x4 terminal cells).
//! let mut fb = Framebuffer::new(16, 16, Pattern::empty()).unwrap();
//!
//! // Light a diagonal.
//! for i in 0..16 {
//!     fb.plot(i, i, true);
//! }
//!
//! let mut frame = Vec::new();
//! render::emit(&fb, &mut frame).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod compose;
pub mod image;
pub mod render;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{resolve, AllocationError, Cell, DotAddress, DotPoint, Framebuffer, Pattern, Style};
pub use compose::blit;
pub use render::StyleState;
pub use terminal::OutputBuffer;
