//! Image module: minimal PNM decoding and pixel classification helpers.
//!
//! Only binary RGB PNM (P6, 8-bit samples) is supported - enough to feed
//! [`blit`] from files produced by `convert foo.png foo.pnm` and the like.
//! The parser is zero-copy: [`PnmImage`] borrows the raw bytes and hands
//! out pixel triples on demand.
//!
//! The classification helpers turn an RGB sample into the quantities a
//! transfer closure typically wants: perceptual-ish luma for dot density,
//! hue and saturation for picking a [`Style`].
//!
//! [`blit`]: crate::compose::blit

use crate::buffer::Style;
use thiserror::Error;

/// Failure to decode a PNM byte stream.
#[derive(Debug, Error)]
pub enum PnmError {
    /// The input does not start with the P6 magic.
    #[error("not a binary RGB PNM image (magic {0:?})")]
    BadMagic(String),
    /// A header field is missing where one was expected.
    #[error("malformed header: missing {0}")]
    MissingField(&'static str),
    /// A header field is not a representable decimal number.
    #[error("malformed header: bad {0}")]
    BadField(&'static str),
    /// Samples wider than 8 bits are not supported.
    #[error("unsupported maxval {0} (only 8-bit samples)")]
    UnsupportedMaxval(u32),
    /// The pixel payload is shorter than the header promises.
    #[error("pixel data truncated: expected {expected} bytes, found {found}")]
    Truncated {
        /// Bytes the header's dimensions require.
        expected: usize,
        /// Bytes actually present after the header.
        found: usize,
    },
}

/// A decoded P6 image borrowing its pixel payload from the input bytes.
#[derive(Debug)]
pub struct PnmImage<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> PnmImage<'a> {
    /// Parse a P6 byte stream.
    ///
    /// Tolerates `#` comments and any amount of whitespace between header
    /// tokens; exactly one whitespace byte separates the maxval from the
    /// pixel payload. Trailing bytes beyond the payload are ignored.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, PnmError> {
        if bytes.len() < 2 || &bytes[..2] != b"P6" {
            let magic = String::from_utf8_lossy(&bytes[..bytes.len().min(2)]).into_owned();
            return Err(PnmError::BadMagic(magic));
        }

        let mut pos = 2;
        let width = read_field(bytes, &mut pos, "width")?;
        let height = read_field(bytes, &mut pos, "height")?;
        let maxval = read_field(bytes, &mut pos, "maxval")?;
        if maxval == 0 || maxval > 255 {
            return Err(PnmError::UnsupportedMaxval(maxval));
        }

        // Single whitespace byte, then the payload.
        pos = (pos + 1).min(bytes.len());

        let expected = width as usize * height as usize * 3;
        let found = bytes.len() - pos;
        if found < expected {
            return Err(PnmError::Truncated { expected, found });
        }

        Ok(Self {
            width,
            height,
            pixels: &bytes[pos..pos + expected],
        })
    }

    /// Image width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The RGB triple at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = 3 * (y as usize * self.width as usize + x as usize);
        self.pixels.get(idx..idx + 3).map(|p| [p[0], p[1], p[2]])
    }

    /// The raw pixel payload, row-major RGB.
    #[inline]
    pub const fn pixels(&self) -> &'a [u8] {
        self.pixels
    }
}

/// Skip whitespace runs and `#` comments (to end of line).
fn skip_separators(bytes: &[u8], pos: &mut usize) {
    while *pos < bytes.len() {
        match bytes[*pos] {
            b' ' | b'\t' | b'\r' | b'\n' => *pos += 1,
            b'#' => {
                while *pos < bytes.len() && bytes[*pos] != b'\n' {
                    *pos += 1;
                }
            }
            _ => break,
        }
    }
}

/// Read one decimal header field.
fn read_field(bytes: &[u8], pos: &mut usize, name: &'static str) -> Result<u32, PnmError> {
    skip_separators(bytes, pos);
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if start == *pos {
        return Err(PnmError::MissingField(name));
    }
    std::str::from_utf8(&bytes[start..*pos])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(PnmError::BadField(name))
}

/// Per-channel pre-weighting applied before classification.
///
/// Drivers use this to bias the dither toward or away from individual
/// channels without touching the source data.
#[derive(Debug, Clone, Copy)]
pub struct ChannelWeights {
    /// Red multiplier.
    pub r: f64,
    /// Green multiplier.
    pub g: f64,
    /// Blue multiplier.
    pub b: f64,
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0 }
    }
}

/// Classify an RGB sample as `(luma, hue, saturation)`.
///
/// Luma is a Rec.-709-weighted sum of the pre-weighted channels; hue is in
/// degrees `[0, 360)` via the hexagonal projection; saturation is the HSL
/// chroma ratio, forced to 0 when luma saturates either end.
pub fn luma_hue_saturation(rgb: [u8; 3], weights: ChannelWeights) -> (f64, f64, f64) {
    let r = f64::from(rgb[0]) / 255.0 * weights.r;
    let g = f64::from(rgb[1]) / 255.0 * weights.g;
    let b = f64::from(rgb[2]) / 255.0 * weights.b;

    let luma = 0.2126 * r + 0.715 * g + 0.722 * b;

    let min = r.min(g).min(b);
    let max = r.max(g).max(b);
    let chroma = max - min;

    let hue = if chroma == 0.0 {
        0.0
    } else if max == r {
        (60.0 * ((g - b) / chroma) + 360.0).rem_euclid(360.0)
    } else if max == g {
        (60.0 * ((b - r) / chroma) + 120.0).rem_euclid(360.0)
    } else {
        (60.0 * ((r - g) / chroma) + 240.0).rem_euclid(360.0)
    };

    let saturation = if luma <= 0.0 || luma >= 1.0 {
        0.0
    } else {
        chroma / (1.0 - (2.0 * luma - 1.0).abs())
    };

    (luma, hue, saturation)
}

/// Map a hue angle onto the nearest basic ANSI foreground color.
///
/// Bands are 60° wide, offset so pure red (hue 0) sits mid-band.
pub fn hue_style(hue_degrees: f64) -> Style {
    if hue_degrees < 30.0 {
        Style::FG_RED
    } else if hue_degrees < 90.0 {
        Style::FG_YELLOW
    } else if hue_degrees < 150.0 {
        Style::FG_GREEN
    } else if hue_degrees < 210.0 {
        Style::FG_CYAN
    } else if hue_degrees < 270.0 {
        Style::FG_MAGENTA
    } else {
        Style::FG_RED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p6(header: &str, pixels: &[u8]) -> Vec<u8> {
        let mut bytes = header.as_bytes().to_vec();
        bytes.extend_from_slice(pixels);
        bytes
    }

    #[test]
    fn test_parse_minimal() {
        let data = p6("P6 2 2 255\n", &[0; 12]);
        let img = PnmImage::parse(&data).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.pixels().len(), 12);
    }

    #[test]
    fn test_parse_with_comments_and_newlines() {
        let data = p6("P6\n# made by hand\n3 1\n# maxval next\n255\n", &[9; 9]);
        let img = PnmImage::parse(&data).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 1);
        assert_eq!(img.pixel(2, 0), Some([9, 9, 9]));
    }

    #[test]
    fn test_pixel_access_and_bounds() {
        #[rustfmt::skip]
        let data = p6("P6 2 1 255\n", &[
            10, 20, 30,
            40, 50, 60,
        ]);
        let img = PnmImage::parse(&data).unwrap();
        assert_eq!(img.pixel(0, 0), Some([10, 20, 30]));
        assert_eq!(img.pixel(1, 0), Some([40, 50, 60]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 1), None);
    }

    #[test]
    fn test_bad_magic() {
        assert!(matches!(
            PnmImage::parse(b"P5 2 2 255\n\0\0\0\0"),
            Err(PnmError::BadMagic(_))
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let data = p6("P6 4 4 255\n", &[0; 10]);
        assert!(matches!(
            PnmImage::parse(&data),
            Err(PnmError::Truncated { expected: 48, found: 10 })
        ));
    }

    #[test]
    fn test_wide_maxval_rejected() {
        let data = p6("P6 1 1 65535\n", &[0; 6]);
        assert!(matches!(
            PnmImage::parse(&data),
            Err(PnmError::UnsupportedMaxval(65535))
        ));
    }

    #[test]
    fn test_luma_extremes() {
        let (black, _, black_sat) = luma_hue_saturation([0, 0, 0], ChannelWeights::default());
        assert_eq!(black, 0.0);
        assert_eq!(black_sat, 0.0);

        let (white, _, white_sat) = luma_hue_saturation([255, 255, 255], ChannelWeights::default());
        assert!(white >= 1.0);
        assert_eq!(white_sat, 0.0);
    }

    #[test]
    fn test_gray_has_no_hue_or_saturation() {
        let (_, hue, sat) = luma_hue_saturation([128, 128, 128], ChannelWeights::default());
        assert_eq!(hue, 0.0);
        assert_eq!(sat, 0.0);
    }

    #[test]
    fn test_primary_hues() {
        let w = ChannelWeights::default();
        let (_, red_hue, red_sat) = luma_hue_saturation([255, 0, 0], w);
        assert_eq!(red_hue, 0.0);
        assert!(red_sat > 0.0);

        let (_, green_hue, _) = luma_hue_saturation([0, 255, 0], w);
        assert_eq!(green_hue, 120.0);

        let (_, blue_hue, _) = luma_hue_saturation([0, 0, 255], w);
        assert_eq!(blue_hue, 240.0);
    }

    #[test]
    fn test_hue_style_bands() {
        assert_eq!(hue_style(0.0), Style::FG_RED);
        assert_eq!(hue_style(60.0), Style::FG_YELLOW);
        assert_eq!(hue_style(120.0), Style::FG_GREEN);
        assert_eq!(hue_style(180.0), Style::FG_CYAN);
        assert_eq!(hue_style(240.0), Style::FG_MAGENTA);
        assert_eq!(hue_style(300.0), Style::FG_RED);
    }
}
