//! Image: blit a PNM (P6) file onto the terminal.
//!
//! Demonstrates:
//! - `PnmImage` as a blit source
//! - A transfer policy: luma-weighted random dither for dot density,
//!   hue classification for the cell color
//! - Scale-to-fit with the 1.3 horizontal stretch that compensates for
//!   terminal cell aspect
//!
//! Usage: `cargo run --example image <file.pnm>`

use dotfield::image::{hue_style, luma_hue_saturation, ChannelWeights, PnmImage};
use dotfield::{blit, render, terminal, Framebuffer, Pattern, Style};
use rand::Rng;
use std::error::Error;
use std::io::{self, Write};

/// Knobs for the dither transfer, mirroring what a driver would tune.
struct TransferOptions {
    weights: ChannelWeights,
    luma_coeff: f64,
    saturation_threshold: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: image <file.pnm>")?;
    let data = std::fs::read(&path)?;
    let img = PnmImage::parse(&data)?;

    let (dot_w, dot_h) = terminal::size::dot_resolution()?;
    let mut fb = Framebuffer::new(dot_w, dot_h, Pattern::empty())?;

    // Fit to 90% of the height; stretch x because cells are taller than wide.
    let y_scale = f64::from(dot_h) * 0.9 / f64::from(img.height());
    let x_scale = y_scale * 1.3;
    #[allow(clippy::cast_possible_truncation)]
    let image_y = ((f64::from(dot_h) - f64::from(img.height()) * y_scale) * 0.35) as i32;
    #[allow(clippy::cast_possible_truncation)]
    let image_x = ((f64::from(dot_w) - f64::from(img.width()) * x_scale) * 0.5) as i32;

    let opts = TransferOptions {
        weights: ChannelWeights { r: 0.5, g: 0.8, b: 1.5 },
        luma_coeff: 1.0,
        saturation_threshold: 0.01,
    };
    let mut rng = rand::thread_rng();

    blit(
        &mut fb,
        &img,
        image_x,
        image_y,
        img.width(),
        img.height(),
        x_scale,
        y_scale,
        |src, sx, sy, pt| {
            if !pt.in_bounds() {
                return;
            }
            let Some(rgb) = src.pixel(sx, sy) else {
                return;
            };

            let (luma, hue, saturation) = luma_hue_saturation(rgb, opts.weights);

            if saturation >= opts.saturation_threshold {
                pt.set_styles(hue_style(hue), Style::NONE, Style::NONE);
            }

            if opts.luma_coeff * rng.gen_range(0.0..1.0) > 1.0 - luma {
                pt.set();
            } else {
                pt.reset();
            }
        },
    );

    let mut stdout = io::stdout().lock();
    let mut frame = Vec::new();
    render::emit(&fb, &mut frame)?;
    stdout.write_all(&frame)?;
    stdout.flush()?;
    Ok(())
}
