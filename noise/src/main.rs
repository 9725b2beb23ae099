use anyhow::Result;
use noise::config::Config;
use noise::display::GlDisplay;
use noise::frame_loop::FrameLoop;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = Config::default();
    let display = GlDisplay::new(&config)?;

    FrameLoop::new(display, rand::thread_rng(), config).run()
}
