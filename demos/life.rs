//! Game of Life: Conway's cellular automaton on a Braille dot grid.
//!
//! Demonstrates:
//! - Double-buffered simulation via `Framebuffer::swap`
//! - Neighbor probing with toroidal wrap through plain `is_set` calls
//! - In-place redraw with `home` + `emit` through an `OutputBuffer`
//!
//! Usage: `cargo run --example life [density-percent]` (default 10).
//! Ctrl-C exits.

use dotfield::{render, terminal, Framebuffer, OutputBuffer, Pattern};
use rand::Rng;
use std::error::Error;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Seeding density from the first argument, as a percentage.
fn density_from_args() -> f64 {
    let Some(arg) = std::env::args().nth(1) else {
        return 0.1;
    };
    let percentage = arg.parse::<f64>().unwrap_or(0.0) / 100.0;
    if percentage < 0.0 {
        0.1
    } else {
        percentage.min(1.0)
    }
}

/// Light random distinct dots until `density` of the grid is populated.
fn seed(fb: &mut Framebuffer, density: f64, rng: &mut impl Rng) {
    let w = fb.dot_width() as i32;
    let h = fb.dot_height() as i32;
    if w == 0 || h == 0 {
        return;
    }

    let mut remaining = (f64::from(fb.dot_width()) * f64::from(fb.dot_height()) * density) as u64;
    while remaining > 0 {
        let x = rng.gen_range(0..w);
        let y = rng.gen_range(0..h);
        if fb.is_set(x, y) {
            continue;
        }
        fb.plot(x, y, true);
        remaining -= 1;
    }
}

/// Count the live neighbors of `(x, y)`, wrapping at the edges.
fn neighbors(fb: &Framebuffer, x: i32, y: i32) -> u8 {
    let w = fb.dot_width() as i32;
    let h = fb.dot_height() as i32;
    let xm1 = (x + w - 1) % w;
    let xp1 = (x + 1) % w;
    let ym1 = (y + h - 1) % h;
    let yp1 = (y + 1) % h;

    u8::from(fb.is_set(xm1, ym1))
        + u8::from(fb.is_set(xm1, y))
        + u8::from(fb.is_set(xm1, yp1))
        + u8::from(fb.is_set(x, ym1))
        + u8::from(fb.is_set(x, yp1))
        + u8::from(fb.is_set(xp1, ym1))
        + u8::from(fb.is_set(xp1, y))
        + u8::from(fb.is_set(xp1, yp1))
}

/// One generation: write the successor of `current` into `next`.
fn step(current: &Framebuffer, next: &mut Framebuffer) {
    let w = current.dot_width() as i32;
    let h = current.dot_height() as i32;
    for x in 0..w {
        for y in 0..h {
            let n = neighbors(current, x, y);
            let alive = if current.is_set(x, y) {
                n == 2 || n == 3
            } else {
                n == 3
            };
            next.plot(x, y, alive);
        }
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
    let mut current = Framebuffer::new(dot_w, dot_h, Pattern::empty())?;
    let mut next = Framebuffer::new(dot_w, dot_h, Pattern::empty())?;

    let mut rng = rand::thread_rng();
    seed(&mut current, density_from_args(), &mut rng);

    let mut stdout = io::stdout().lock();
    let mut frame = OutputBuffer::new();

    render::emit(&current, &mut frame)?;
    frame.flush_to(&mut stdout)?;

    while !stop.load(Ordering::SeqCst) {
        step(&current, &mut next);

        frame.clear();
        render::home(&current, &mut frame)?;
        render::emit(&current, &mut frame)?;
        frame.flush_to(&mut stdout)?;

        current.swap(&mut next);
        std::thread::sleep(Duration::from_millis(33));
    }

    stdout.write_all(b"\x1b[0m\n")?;
    Ok(())
}
