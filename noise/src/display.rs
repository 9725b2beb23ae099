use crate::config::Config;
use crate::frame::FrameBuffer;
use crate::overlay::OverlaySurface;
use anyhow::Result;
use backend::blit::Blitter;
use backend::glutils::{print_opengl_info, GlErrorWatch};
use backend::system::System;
use backend::texture::{PixelFormat, Texture};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// The render target holding the last uploaded frame.
    Target,
    /// The last uploaded overlay surface.
    Overlay,
}

/// What the frame loop needs from a screen.
pub trait Display {
    /// Drains all pending events, returning true if any was a close request.
    fn poll_close(&mut self) -> bool;

    /// Copies `frame` into the render target.
    fn upload_frame(&mut self, frame: &FrameBuffer) -> Result<()>;

    fn upload_overlay(&mut self, overlay: &OverlaySurface) -> Result<()>;

    /// Draws `layer` unscaled with its top-left corner at `origin`, over
    /// whatever was drawn before it this frame.
    fn draw(&mut self, layer: Layer, origin: (i32, i32));

    fn present(&mut self);
}

pub struct GlDisplay {
    // GL objects first so they are deleted while the context is alive
    blitter: Blitter,
    target: Texture,
    overlay: Texture,
    system: System,
    gl_errors: GlErrorWatch,
}

impl GlDisplay {
    pub fn new(config: &Config) -> Result<GlDisplay> {
        let overlay_size = {
            let line = OverlaySurface::line(config.width);
            (line.width(), line.height())
        };
        let system = System::new(&config.title, config.width, config.height)?;
        print_opengl_info();

        let target = Texture::new(config.width as u32, config.height as u32, PixelFormat::Rgb)?;
        let overlay = Texture::new(
            overlay_size.0 as u32,
            overlay_size.1 as u32,
            PixelFormat::Rgba,
        )?;
        let blitter = Blitter::new()?;

        Ok(GlDisplay {
            blitter,
            target,
            overlay,
            system,
            gl_errors: GlErrorWatch::new(),
        })
    }

    fn viewport(&self) -> (u32, u32) {
        (self.system.w as u32, self.system.h as u32)
    }
}

impl Display for GlDisplay {
    fn poll_close(&mut self) -> bool {
        !self.system.process_io_events()
    }

    fn upload_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.target.upload(frame.as_bytes())
    }

    fn upload_overlay(&mut self, overlay: &OverlaySurface) -> Result<()> {
        self.overlay.upload(overlay.as_bytes())
    }

    fn draw(&mut self, layer: Layer, origin: (i32, i32)) {
        let viewport = self.viewport();
        let texture = match layer {
            Layer::Target => {
                self.system.clear_screen(0.0, 0.0, 0.0);
                &self.target
            }
            Layer::Overlay => &self.overlay,
        };
        self.blitter.draw(texture, origin.0, origin.1, viewport);
    }

    fn present(&mut self) {
        self.gl_errors.check("frame");
        self.system.draw_to_screen();
    }
}
