use anyhow::{Context, Result};
use gl;
use log::{debug, info, warn};
use sdl2;
use sdl2::event::{Event, WindowEvent};
use sdl2::video::{GLProfile, SwapInterval};

/// The process-wide display state: SDL, one window, its GL context and the
/// event pump. Created once at startup and torn down when dropped.
pub struct System {
    pub w: usize,
    pub h: usize,
    // drop order: pump and GL context go before the window and SDL itself
    event_pump: sdl2::EventPump,
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(title: &str, w: usize, h: usize) -> Result<System> {
        let sdl_context = sdl2::init()
            .map_err(anyhow::Error::msg)
            .context("SDL initialization failed")?;
        let video_subsystem = sdl_context
            .video()
            .map_err(anyhow::Error::msg)
            .context("SDL video subsystem unavailable")?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(title, w as u32, h as u32)
            .opengl()
            .position_centered()
            .build()
            .context("Error while building OpenGL window")?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(anyhow::Error::msg)
            .context("Error while creating OpenGL context")?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (3, 3));

        // uncapped: presenting never waits for vertical sync
        if let Err(e) = video_subsystem.gl_set_swap_interval(SwapInterval::Immediate) {
            warn!("could not disable vsync: {e}");
        }

        let event_pump = sdl_context
            .event_pump()
            .map_err(anyhow::Error::msg)
            .context("SDL event pump unavailable")?;

        unsafe { gl::Viewport(0, 0, w as i32, h as i32) };
        info!("opened {}x{} window '{}'", w, h, title);

        Ok(System {
            w,
            h,
            event_pump,
            gl_ctx,
            window,
            video_subsystem,
            sdl_context,
        })
    }

    /// Drains every pending event. Returns `false` once a close request was
    /// seen; everything else is ignored.
    pub fn process_io_events(&mut self) -> bool {
        let mut running = true;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::Window {
                    win_event: WindowEvent::Close,
                    ..
                } => {
                    debug!("close requested");
                    running = false;
                }
                _ => {}
            }
        }
        running
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
    }

    pub fn clear_screen(&mut self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

impl Drop for System {
    fn drop(&mut self) {
        debug!("releasing {}x{} window", self.w, self.h);
    }
}
