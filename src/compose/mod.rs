//! Composer: scaled copy of an external pixel source into a framebuffer.
//!
//! [`blit`] owns only the geometry - step counts, nearest-neighbor inverse
//! mapping, destination-dot resolution. What a source pixel *means* (which
//! dots to light, which styles to attach) is entirely the transfer
//! closure's business, so any source format works without the core knowing
//! about it.

use crate::buffer::{DotPoint, Framebuffer};

/// Blit a scaled region of `source` into `dest` at `(dest_x, dest_y)`.
///
/// Covers `floor(source_width * x_scale)` × `floor(source_height * y_scale)`
/// destination dots. For each destination offset `(i, j)` the source sample
/// is chosen by nearest-neighbor inverse mapping - `round(i / x_scale)`,
/// `round(j / y_scale)` - and the transfer closure is invoked with the
/// source handle, the sample coordinates, and the resolved destination
/// [`DotPoint`].
///
/// The destination point's cell reference is absent for dots falling
/// outside `dest`; the closure is still invoked and must no-op on absence
/// (the `DotPoint` helpers already do), mirroring `plot`'s out-of-bounds
/// policy. Non-positive step counts yield no invocations.
pub fn blit<S, F>(
    dest: &mut Framebuffer,
    source: &S,
    dest_x: i32,
    dest_y: i32,
    source_width: u32,
    source_height: u32,
    x_scale: f64,
    y_scale: f64,
    mut transfer: F,
) where
    S: ?Sized,
    F: FnMut(&S, u32, u32, &mut DotPoint<'_>),
{
    #[allow(clippy::cast_possible_truncation)]
    let w_steps = (f64::from(source_width) * x_scale) as i32;
    #[allow(clippy::cast_possible_truncation)]
    let h_steps = (f64::from(source_height) * y_scale) as i32;

    log::debug!(
        "blit: {source_width}x{source_height} source -> {w_steps}x{h_steps} dots at ({dest_x}, {dest_y})"
    );

    for i in 0..w_steps {
        for j in 0..h_steps {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let src_x = (f64::from(i) / x_scale).round() as u32;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let src_y = (f64::from(j) / y_scale).round() as u32;

            let mut pt = dest.dot_at_mut(dest_x + i, dest_y + j);
            transfer(source, src_x, src_y, &mut pt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Pattern;

    fn fb(dot_w: u16, dot_h: u16) -> Framebuffer {
        Framebuffer::new(dot_w, dot_h, Pattern::empty()).unwrap()
    }

    #[test]
    fn test_downscale_invocation_count_and_mapping() {
        // 4x4 source at half scale: exactly 2x2 destination dots, source
        // samples at round(i / 0.5) = {0, 2}.
        let mut dest = fb(8, 8);
        let mut calls = Vec::new();

        blit(&mut dest, &(), 0, 0, 4, 4, 0.5, 0.5, |_src, sx, sy, pt| {
            calls.push((sx, sy, pt.x, pt.y, pt.in_bounds()));
        });

        assert_eq!(calls.len(), 4);
        for &(sx, sy, dx, dy, in_bounds) in &calls {
            assert!((0..4).contains(&sx), "src_x {sx} out of source");
            assert!((0..4).contains(&sy), "src_y {sy} out of source");
            assert!((0..2).contains(&dx));
            assert!((0..2).contains(&dy));
            assert!(in_bounds);
        }
        let sources: Vec<_> = calls.iter().map(|c| (c.0, c.1)).collect();
        assert!(sources.contains(&(0, 0)));
        assert!(sources.contains(&(2, 2)));
    }

    #[test]
    fn test_upscale_repeats_source_samples() {
        // 2x1 source at 2x: four destination columns sampling src_x
        // round(i / 2) = {0, 1, 1, 2-clamped-by-caller}.
        let mut dest = fb(8, 4);
        let mut src_xs = Vec::new();

        blit(&mut dest, &(), 0, 0, 2, 1, 2.0, 1.0, |_src, sx, _sy, pt| {
            src_xs.push(sx);
            pt.set();
        });

        assert_eq!(src_xs, vec![0, 1, 1, 2]);
        assert!(dest.is_set(0, 0));
        assert!(dest.is_set(3, 0));
    }

    #[test]
    fn test_transfer_sees_absent_cell_outside_dest() {
        let mut dest = fb(4, 4);
        let mut outside = 0;

        // 4x4 source at unit scale placed so half the dots miss the buffer.
        blit(&mut dest, &(), 2, 2, 4, 4, 1.0, 1.0, |_src, _sx, _sy, pt| {
            if !pt.in_bounds() {
                outside += 1;
            }
            pt.set();
        });

        // Dest is 4x4 dots; the blit covers (2..6)x(2..6), of which 2x2 land.
        assert_eq!(outside, 12);
        assert!(dest.is_set(2, 2));
        assert!(dest.is_set(3, 3));
        assert!(!dest.is_set(0, 0));
    }

    #[test]
    fn test_zero_scale_never_invokes_transfer() {
        let mut dest = fb(8, 8);
        let mut calls = 0;
        blit(&mut dest, &(), 0, 0, 4, 4, 0.0, 1.0, |_src, _, _, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_transfer_can_style_cells() {
        let mut dest = fb(8, 8);
        blit(&mut dest, &(), 0, 0, 2, 2, 1.0, 1.0, |_src, _sx, _sy, pt| {
            pt.set();
            pt.set_styles(crate::buffer::Style::FG_RED, crate::buffer::Style::NONE, crate::buffer::Style::NONE);
        });
        let cell = dest.cell(0, 0).unwrap();
        assert_eq!(cell.style1(), crate::buffer::Style::FG_RED);
        assert!(!cell.pattern().is_empty());
    }
}
