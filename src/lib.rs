mod film;
pub mod plot;
pub mod sampler;

pub use film::Film;
pub use plot::render;
pub use sampler::{generate, Generation, Parameters, Point, MAX_POINTS, MIN_POINTS};

pub fn rgb_to_u32(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) + ((g as u32) << 8) + (b as u32)
}

pub fn triple_to_u32(triple: (u8, u8, u8)) -> u32 {
    rgb_to_u32(triple.0, triple.1, triple.2)
}

// h in degrees, s and v in [0, 1]
pub fn hsv_to_rgb(h: usize, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let x = c * (1.0 - ((h as f32 / 60.0) % 2.0 - 1.0)).abs();
    let m = v - c;
    let (r, g, b) = match h / 60 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        5 | 6 => (c, 0.0, x),
        _ => (0.0, 0.0, 0.0),
    };
    (
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

pub fn attempt_write(film: &mut Film<u32>, px: usize, py: usize, c: u32) {
    if px >= film.width || py >= film.height {
        return;
    }
    film.write_at(px, py, c);
}
