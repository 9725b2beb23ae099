use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};

pub const OVERLAY_FONT: &MonoFont<'static> = &FONT_10X20;

/// Formats the frame-rate line; the rate is truncated, never rounded.
pub fn overlay_text(fps: f32, label: &str) -> String {
    // `as` saturates: NaN and negatives become 0
    format!("FPS: {} - {}", fps as u32, label)
}

/// RGBA8 surface the overlay text is rasterised into. Unpainted pixels stay
/// fully transparent.
#[derive(Debug, Clone)]
pub struct OverlaySurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl OverlaySurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// A surface one text line tall spanning `width` pixels.
    pub fn line(width: usize) -> Self {
        Self::new(width, OVERLAY_FONT.character_size.height as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn clear_transparent(&mut self) {
        self.pixels.fill(0);
    }

    /// Replaces the surface contents with `text` in black, top-left aligned.
    pub fn render(&mut self, text: &str) {
        self.clear_transparent();
        let style = MonoTextStyle::new(OVERLAY_FONT, Rgb888::BLACK);
        Text::with_baseline(text, Point::zero(), style, Baseline::Top)
            .draw(self)
            .ok();
    }
}

impl OriginDimensions for OverlaySurface {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for OverlaySurface {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                continue;
            }
            let i = (y as usize * self.width + x as usize) * 4;
            self.pixels[i..i + 4].copy_from_slice(&[color.r(), color.g(), color.b(), 0xff]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_has_prefix_and_truncated_rate() {
        assert_eq!(overlay_text(59.99, "x"), "FPS: 59 - x");
        assert_eq!(overlay_text(0.0, "Vsize 1 W/C++"), "FPS: 0 - Vsize 1 W/C++");
    }

    #[test]
    fn rate_is_never_negative() {
        for fps in [-3.0, f32::NAN] {
            let text = overlay_text(fps, "x");
            let digits = text
                .strip_prefix("FPS: ")
                .and_then(|rest| rest.split(' ').next())
                .unwrap();
            assert_eq!(digits.parse::<u32>().unwrap(), 0);
        }
    }

    #[test]
    fn glyphs_are_black_and_background_transparent() {
        let mut surface = OverlaySurface::line(512);
        assert_eq!(surface.height(), 20);

        surface.render("FPS: 0");
        let mut inked = 0;
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                match surface.pixel(x, y) {
                    [0, 0, 0, 0xff] => inked += 1,
                    [0, 0, 0, 0] => {}
                    other => panic!("unexpected pixel {other:?} at ({x}, {y})"),
                }
            }
        }
        assert!(inked > 0);

        // nothing drawn past the six characters
        for y in 0..surface.height() {
            assert_eq!(surface.pixel(60, y)[3], 0);
        }
    }

    #[test]
    fn render_clears_previous_text() {
        let mut surface = OverlaySurface::line(512);
        surface.render("FPS: 1000 - long label");
        surface.render("");
        assert!(surface.as_bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn text_wider_than_the_surface_is_clipped() {
        let mut surface = OverlaySurface::new(16, 20);
        surface.render("FPS: 123456789");
        assert_eq!(surface.as_bytes().len(), 16 * 20 * 4);
    }
}
