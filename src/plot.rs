//! Headless projection of a generation onto a pixel buffer. Left panel is
//! the scatter plot of the raw (x, y) pairs, right panel the empirical CDF
//! of the per-pair maxima with guide lines at the target fraction and at the
//! approximated and actual roots.

use crate::film::Film;
use crate::sampler::Generation;
use crate::{attempt_write, hsv_to_rgb, triple_to_u32};

pub const SELECTED_COLOR: (u8, u8, u8) = (255, 160, 40);
pub const UNSELECTED_COLOR: (u8, u8, u8) = (90, 90, 110);
pub const TARGET_COLOR: (u8, u8, u8) = (70, 130, 255);
pub const APPROX_COLOR: (u8, u8, u8) = (255, 80, 80);
pub const ACTUAL_COLOR: (u8, u8, u8) = (80, 255, 120);
pub const DIVIDER_COLOR: (u8, u8, u8) = (50, 50, 50);

fn draw_dot(film: &mut Film<u32>, px: usize, py: usize, c: u32) {
    attempt_write(film, px, py, c);
    attempt_write(film, px + 1, py, c);
    attempt_write(film, px, py + 1, c);
    attempt_write(film, px + 1, py + 1, c);
}

fn draw_vertical(film: &mut Film<u32>, x0: usize, x1: usize, px: usize, c: u32) {
    let px = px.clamp(x0, x1.saturating_sub(1));
    for py in 0..film.height {
        attempt_write(film, px, py, c);
    }
}

fn draw_horizontal(film: &mut Film<u32>, x0: usize, x1: usize, py: usize, c: u32) {
    let py = py.min(film.height - 1);
    for px in x0..x1 {
        attempt_write(film, px, py, c);
    }
}

/// Renders a generation into a fresh `width` x `height` buffer. Pure
/// function of its inputs, no window required.
pub fn render(gen: &Generation, target_value: f32, width: usize, height: usize) -> Film<u32> {
    let mut film = Film::new(width, height, 0u32);
    let panel_width = width / 2;
    let (h, w) = (height as f32, panel_width as f32);

    // scatter panel: unit square, y up
    for point in &gen.points {
        let color = if point.selected {
            SELECTED_COLOR
        } else {
            UNSELECTED_COLOR
        };
        let px = (point.x * (w - 2.0)) as usize;
        let py = ((1.0 - point.y) * (h - 2.0)) as usize;
        draw_dot(&mut film, px, py, triple_to_u32(color));
    }

    // CDF panel: rank fraction against max value, over the already-sorted
    // sequence. Hue runs blue to red with the rank fraction so the curve
    // direction reads at a glance.
    let n = gen.points.len();
    for (rank, point) in gen.points.iter().enumerate() {
        let fraction = (rank + 1) as f32 / n as f32;
        let px = panel_width + (point.max * (w - 2.0)) as usize;
        let py = ((1.0 - fraction) * (h - 2.0)) as usize;
        let hue = (240.0 * (1.0 - fraction)) as usize;
        draw_dot(&mut film, px, py, triple_to_u32(hsv_to_rgb(hue, 0.4, 0.95)));
    }

    let target_py = ((1.0 - target_value) * (h - 1.0)) as usize;
    draw_horizontal(
        &mut film,
        panel_width,
        width,
        target_py,
        triple_to_u32(TARGET_COLOR),
    );
    let actual_px = panel_width + (gen.actual_sqrt * (w - 1.0)) as usize;
    draw_vertical(
        &mut film,
        panel_width,
        width,
        actual_px,
        triple_to_u32(ACTUAL_COLOR),
    );
    let approx_px = panel_width + (gen.approximated_sqrt * (w - 1.0)) as usize;
    draw_vertical(
        &mut film,
        panel_width,
        width,
        approx_px,
        triple_to_u32(APPROX_COLOR),
    );

    // panel divider
    draw_vertical(&mut film, 0, width, panel_width, triple_to_u32(DIVIDER_COLOR));

    film
}
