use crate::frame::NoiseMode;

pub const WINDOW_WIDTH: usize = 512;
pub const WINDOW_HEIGHT: usize = 512;

/// Annotation printed after the frame rate. Carries no meaning.
pub const OVERLAY_LABEL: &str = "Vsize 1 W/C++";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub title: String,
    pub label: String,
    /// Top-left corner of the overlay, in window pixels.
    pub overlay_origin: (i32, i32),
    pub mode: NoiseMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            title: "noise".to_string(),
            label: OVERLAY_LABEL.to_string(),
            overlay_origin: (0, 10),
            mode: NoiseMode::Pixels,
        }
    }
}
