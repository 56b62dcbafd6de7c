//! Cell: The atomic unit of the dot grid.
//!
//! # Memory Layout
//!
//! One cell is one terminal character position and packs into 4 bytes,
//! so 16 cells share a cache line:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Cell Layout (4 bytes)                   │
//! ├───────────┬─────────┬─────────┬─────────┤
//! │  pattern  │ style1  │ style2  │ style3  │
//! │  u8       │ u8      │ u8      │ u8      │
//! └───────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! `pattern` holds the 8 Braille dots; the three style slots hold opaque
//! terminal SGR codes with 0 as the "no style" sentinel.

use bitflags::bitflags;

bitflags! {
    /// The eight dots of one Braille cell.
    ///
    /// Bit *k* is Braille dot *k + 1*, matching the Unicode Braille block:
    /// the glyph for a pattern is the character at `U+2800 + bits`.
    ///
    /// Dot positions within the 2×4 sub-grid:
    ///
    /// ```text
    /// ┌───┬───┐
    /// │ 1 │ 4 │
    /// │ 2 │ 5 │
    /// │ 3 │ 6 │
    /// │ 7 │ 8 │
    /// └───┴───┘
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Pattern: u8 {
        /// Top-left dot.
        const DOT_1 = 0b0000_0001;
        /// Middle-left dot.
        const DOT_2 = 0b0000_0010;
        /// Lower-left dot.
        const DOT_3 = 0b0000_0100;
        /// Top-right dot.
        const DOT_4 = 0b0000_1000;
        /// Middle-right dot.
        const DOT_5 = 0b0001_0000;
        /// Lower-right dot.
        const DOT_6 = 0b0010_0000;
        /// Bottom-left dot.
        const DOT_7 = 0b0100_0000;
        /// Bottom-right dot.
        const DOT_8 = 0b1000_0000;
    }
}

impl Pattern {
    /// The Braille glyph for this pattern.
    ///
    /// Every 8-bit pattern maps to a valid codepoint in `U+2800..=U+28FF`.
    #[inline]
    pub const fn glyph(self) -> char {
        match char::from_u32(0x2800 + self.bits() as u32) {
            Some(c) => c,
            None => ' ',
        }
    }
}

impl From<u8> for Pattern {
    /// All 8 bits are meaningful, so any byte is a valid pattern.
    #[inline]
    fn from(bits: u8) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// One terminal display attribute: an opaque SGR code.
///
/// The renderer emits this as `ESC [ <code> m` and otherwise never
/// interprets it. `Style::NONE` (code 0) is the sentinel for an empty
/// style slot; it doubles as the SGR full-reset code, which is why an
/// empty slot is never emitted per cell.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style(u8);

impl Style {
    /// The empty-slot sentinel (SGR 0).
    pub const NONE: Self = Self(0);

    /// Bold / increased intensity (SGR 1).
    pub const BOLD: Self = Self(1);
    /// Faint / decreased intensity (SGR 2).
    pub const FAINT: Self = Self(2);
    /// Italic (SGR 3).
    pub const ITALIC: Self = Self(3);
    /// Underline (SGR 4).
    pub const UNDERLINE: Self = Self(4);
    /// Slow blink (SGR 5).
    pub const BLINK: Self = Self(5);
    /// Reverse video (SGR 7).
    pub const REVERSE: Self = Self(7);

    /// Black foreground (SGR 30).
    pub const FG_BLACK: Self = Self(30);
    /// Red foreground (SGR 31).
    pub const FG_RED: Self = Self(31);
    /// Green foreground (SGR 32).
    pub const FG_GREEN: Self = Self(32);
    /// Yellow foreground (SGR 33).
    pub const FG_YELLOW: Self = Self(33);
    /// Blue foreground (SGR 34).
    pub const FG_BLUE: Self = Self(34);
    /// Magenta foreground (SGR 35).
    pub const FG_MAGENTA: Self = Self(35);
    /// Cyan foreground (SGR 36).
    pub const FG_CYAN: Self = Self(36);
    /// White foreground (SGR 37).
    pub const FG_WHITE: Self = Self(37);
    /// Default foreground (SGR 39).
    pub const FG_DEFAULT: Self = Self(39);

    /// Black background (SGR 40).
    pub const BG_BLACK: Self = Self(40);
    /// Red background (SGR 41).
    pub const BG_RED: Self = Self(41);
    /// Green background (SGR 42).
    pub const BG_GREEN: Self = Self(42);
    /// Yellow background (SGR 43).
    pub const BG_YELLOW: Self = Self(43);
    /// Blue background (SGR 44).
    pub const BG_BLUE: Self = Self(44);
    /// Magenta background (SGR 45).
    pub const BG_MAGENTA: Self = Self(45);
    /// Cyan background (SGR 46).
    pub const BG_CYAN: Self = Self(46);
    /// White background (SGR 47).
    pub const BG_WHITE: Self = Self(47);
    /// Default background (SGR 49).
    pub const BG_DEFAULT: Self = Self(49);

    /// Create a style from a raw SGR code.
    #[inline]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// The raw SGR code.
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Whether this is the empty-slot sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for Style {
    #[inline]
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "Style(none)")
        } else {
            write!(f, "Style({})", self.0)
        }
    }
}

/// A single grid cell: one Braille glyph plus up to three style slots.
///
/// The pattern decides which of the cell's 2×4 dots are lit; the style
/// slots carry the SGR attributes the renderer asserts before drawing
/// the glyph. Styles are cell-granular, not per-dot.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Lit dots.
    pattern: Pattern,
    /// First style slot.
    style1: Style,
    /// Second style slot.
    style2: Style,
    /// Third style slot.
    style3: Style,
}

// Compile-time assertion: Cell must be exactly 4 bytes
const _: () = assert!(
    std::mem::size_of::<Cell>() == 4,
    "Cell must be exactly 4 bytes; the grid is a dense Vec of these"
);

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// A cell with no dots lit and empty style slots (the blank glyph `U+2800`).
    pub const EMPTY: Self = Self::new(Pattern::empty());

    /// Create a cell with the given pattern and empty style slots.
    #[inline]
    pub const fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            style1: Style::NONE,
            style2: Style::NONE,
            style3: Style::NONE,
        }
    }

    /// The lit dots.
    #[inline]
    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Replace the whole pattern.
    #[inline]
    pub fn set_pattern(&mut self, pattern: Pattern) -> &mut Self {
        self.pattern = pattern;
        self
    }

    /// Light every dot in `mask`.
    #[inline]
    pub fn set_dots(&mut self, mask: Pattern) -> &mut Self {
        self.pattern.insert(mask);
        self
    }

    /// Extinguish every dot in `mask`.
    #[inline]
    pub fn clear_dots(&mut self, mask: Pattern) -> &mut Self {
        self.pattern.remove(mask);
        self
    }

    /// Whether all dots in `mask` are lit.
    #[inline]
    pub const fn has_dots(&self, mask: Pattern) -> bool {
        self.pattern.contains(mask)
    }

    /// The three style slots in emission order.
    #[inline]
    pub const fn styles(&self) -> (Style, Style, Style) {
        (self.style1, self.style2, self.style3)
    }

    /// First style slot.
    #[inline]
    pub const fn style1(&self) -> Style {
        self.style1
    }

    /// Second style slot.
    #[inline]
    pub const fn style2(&self) -> Style {
        self.style2
    }

    /// Third style slot.
    #[inline]
    pub const fn style3(&self) -> Style {
        self.style3
    }

    /// Overwrite all three style slots.
    #[inline]
    pub fn set_styles(&mut self, s1: Style, s2: Style, s3: Style) -> &mut Self {
        self.style1 = s1;
        self.style2 = s2;
        self.style3 = s3;
        self
    }

    /// Set the style slots (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_styles(mut self, s1: Style, s2: Style, s3: Style) -> Self {
        self.style1 = s1;
        self.style2 = s2;
        self.style3 = s3;
        self
    }

    /// The Braille glyph for this cell's pattern.
    #[inline]
    pub const fn glyph(&self) -> char {
        self.pattern.glyph()
    }

    /// Reset to the empty cell.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("glyph", &self.glyph())
            .field("pattern", &self.pattern)
            .field("style1", &self.style1)
            .field("style2", &self.style2)
            .field("style3", &self.style3)
            .finish()
    }
}
