use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseMode {
    /// Every channel of every pixel sampled independently.
    Pixels,
    /// Square blocks of `size` pixels, each one random colour.
    Blocks { size: usize },
}

pub const CHANNELS: usize = 3;

/// Row-major, tightly packed RGB8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer {
            width,
            height,
            data: vec![0; width * height * CHANNELS],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Overwrites every pixel with fresh uniform values in `[0, 256)`.
    pub fn fill<R: Rng + ?Sized>(&mut self, mode: NoiseMode, rng: &mut R) {
        match mode {
            NoiseMode::Pixels => rng.fill_bytes(&mut self.data),
            NoiseMode::Blocks { size } => self.fill_blocks(size.max(1), rng),
        }
    }

    fn fill_blocks<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) {
        let row_len = self.width * CHANNELS;
        for by in (0..self.height).step_by(size) {
            for bx in (0..self.width).step_by(size) {
                let color: [u8; 3] = rng.gen();
                let x_end = (bx + size).min(self.width);
                for y in by..(by + size).min(self.height) {
                    let row = &mut self.data[y * row_len..(y + 1) * row_len];
                    for px in row[bx * CHANNELS..x_end * CHANNELS].chunks_exact_mut(CHANNELS) {
                        px.copy_from_slice(&color);
                    }
                }
            }
        }
    }
}
