//! Spiral: an animated Archimedean spiral.
//!
//! Demonstrates:
//! - Dot plotting from continuous math
//! - Cell-granular styling (`set_cell_styles`) alongside per-dot patterns
//! - In-place animation with `home` + `emit`
//!
//! Ctrl-C exits.

use dotfield::{render, terminal, Framebuffer, OutputBuffer, Pattern, Style};
use std::error::Error;
use std::f64::consts::TAU;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const PALETTE: [Style; 5] = [
    Style::FG_RED,
    Style::FG_YELLOW,
    Style::FG_GREEN,
    Style::FG_CYAN,
    Style::FG_MAGENTA,
];

/// Plot one full spiral, rotated by `phase` radians.
fn draw(fb: &mut Framebuffer, phase: f64) {
    let cx = f64::from(fb.dot_width()) / 2.0;
    let cy = f64::from(fb.dot_height()) / 2.0;
    let max_radius = cx.min(cy) - 1.0;
    if max_radius <= 0.0 {
        return;
    }

    let turns = 6.0;
    let steps = 1600;
    for s in 0..steps {
        let t = f64::from(s) / f64::from(steps);
        let theta = t * turns * TAU + phase;
        let radius = t * max_radius;

        #[allow(clippy::cast_possible_truncation)]
        let x = (cx + radius * theta.cos()).round() as i32;
        #[allow(clippy::cast_possible_truncation)]
        let y = (cy + radius * theta.sin()).round() as i32;

        fb.plot(x, y, true);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ring = (t * turns) as usize;
        let style = PALETTE[ring % PALETTE.len()];
        fb.set_cell_styles(x, y, style, Style::NONE, Style::NONE);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))?;
    }

    let (dot_w, dot_h) = terminal::size::dot_resolution()?;
    let mut fb = Framebuffer::new(dot_w, dot_h, Pattern::empty())?;

    let mut stdout = io::stdout().lock();
    let mut frame = OutputBuffer::new();
    let mut phase = 0.0;

    draw(&mut fb, phase);
    render::emit(&fb, &mut frame)?;
    frame.flush_to(&mut stdout)?;

    while !stop.load(Ordering::SeqCst) {
        phase += 0.05;
        fb.clear(Pattern::empty());
        draw(&mut fb, phase);

        frame.clear();
        render::home(&fb, &mut frame)?;
        render::emit(&fb, &mut frame)?;
        frame.flush_to(&mut stdout)?;

        std::thread::sleep(Duration::from_millis(33));
    }

    stdout.write_all(b"\x1b[0m\n")?;
    Ok(())
}
