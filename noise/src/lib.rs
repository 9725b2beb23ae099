pub mod config;
pub mod display;
pub mod fps;
pub mod frame;
pub mod frame_loop;
pub mod overlay;
