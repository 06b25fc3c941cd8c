#[derive(Clone, Debug)]
pub struct Film<T> {
    pub buffer: Vec<T>,
    pub width: usize,
    pub height: usize,
}

impl<T: Copy> Film<T> {
    pub fn new(width: usize, height: usize, fill_value: T) -> Film<T> {
        Film {
            buffer: vec![fill_value; width * height],
            width,
            height,
        }
    }

    pub fn at(&self, x: usize, y: usize) -> T {
        self.buffer[y * self.width + x]
    }

    // uv coordinates are in [0, 1)
    pub fn at_uv(&self, uv: (f32, f32)) -> T {
        let (x, y) = (
            (uv.0 * self.width as f32) as usize,
            (uv.1 * self.height as f32) as usize,
        );
        self.at(x.min(self.width - 1), y.min(self.height - 1))
    }

    pub fn write_at(&mut self, x: usize, y: usize, value: T) {
        self.buffer[y * self.width + x] = value;
    }
}
