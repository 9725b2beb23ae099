use crate::config::Config;
use crate::display::{Display, Layer};
use crate::fps::FpsCounter;
use crate::frame::FrameBuffer;
use crate::overlay::{overlay_text, OverlaySurface};
use anyhow::Result;
use log::{debug, trace};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closed,
}

/// Owns the display context and everything drawn each frame.
pub struct FrameLoop<D: Display, R: Rng> {
    display: D,
    rng: R,
    config: Config,
    frame: FrameBuffer,
    overlay: OverlaySurface,
    fps: FpsCounter,
    state: LoopState,
    frames: u64,
}

impl<D: Display, R: Rng> FrameLoop<D, R> {
    pub fn new(display: D, rng: R, config: Config) -> Self {
        let frame = FrameBuffer::new(config.width, config.height);
        let overlay = OverlaySurface::line(config.width);
        Self {
            display,
            rng,
            config,
            frame,
            overlay,
            fps: FpsCounter::new(),
            state: LoopState::Running,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Completed iterations, each one generation plus one presentation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn step(&mut self) -> Result<LoopState> {
        if self.state == LoopState::Closed {
            return Ok(LoopState::Closed);
        }
        if self.display.poll_close() {
            self.state = LoopState::Closed;
            return Ok(LoopState::Closed);
        }

        self.frame.fill(self.config.mode, &mut self.rng);
        self.display.upload_frame(&self.frame)?;

        let fps = self.fps.fps();
        trace!("fps {fps:.1}");
        self.overlay.render(&overlay_text(fps, &self.config.label));
        self.composite()?;

        self.display.present();
        self.fps.tick();
        self.frames += 1;
        Ok(LoopState::Running)
    }

    /// Noise first at the window origin, overlay on top of it.
    fn composite(&mut self) -> Result<()> {
        self.display.upload_overlay(&self.overlay)?;
        self.display.draw(Layer::Target, (0, 0));
        self.display.draw(Layer::Overlay, self.config.overlay_origin);
        Ok(())
    }

    /// Runs until the display reports a close request, then releases it.
    pub fn run(mut self) -> Result<()> {
        while self.step()? == LoopState::Running {}
        debug!("closed after {} frames", self.frames);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::{Duration, Instant};

    #[derive(Debug, PartialEq)]
    enum Call {
        Upload,
        UploadOverlay,
        Draw(Layer, (i32, i32)),
        Present,
    }

    /// Reports a close on poll number `close_on` (0-based).
    struct Recorder {
        polls: usize,
        close_on: usize,
        calls: Vec<Call>,
        frames: Vec<FrameBuffer>,
        texts: Vec<OverlaySurface>,
    }

    impl Recorder {
        fn closing_on(close_on: usize) -> Self {
            Self {
                polls: 0,
                close_on,
                calls: Vec::new(),
                frames: Vec::new(),
                texts: Vec::new(),
            }
        }

        fn count(&self, call: fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| call(c)).count()
        }
    }

    impl Display for Recorder {
        fn poll_close(&mut self) -> bool {
            let close = self.polls == self.close_on;
            self.polls += 1;
            close
        }

        fn upload_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
            self.calls.push(Call::Upload);
            self.frames.push(frame.clone());
            Ok(())
        }

        fn upload_overlay(&mut self, overlay: &OverlaySurface) -> Result<()> {
            self.calls.push(Call::UploadOverlay);
            self.texts.push(overlay.clone());
            Ok(())
        }

        fn draw(&mut self, layer: Layer, origin: (i32, i32)) {
            self.calls.push(Call::Draw(layer, origin));
        }

        fn present(&mut self) {
            self.calls.push(Call::Present);
        }
    }

    fn frame_loop(close_on: usize) -> FrameLoop<Recorder, StdRng> {
        FrameLoop::new(
            Recorder::closing_on(close_on),
            StdRng::seed_from_u64(11),
            Config::default(),
        )
    }

    fn run_to_close(lp: &mut FrameLoop<Recorder, StdRng>) {
        while lp.step().unwrap() == LoopState::Running {}
    }

    #[test]
    fn close_as_first_event_generates_nothing() {
        let mut lp = frame_loop(0);
        assert_eq!(lp.step().unwrap(), LoopState::Closed);
        assert_eq!(lp.frames(), 0);
        assert!(lp.display().calls.is_empty());
    }

    #[test]
    fn n_iterations_upload_and_present_n_times() {
        let n = 4;
        let mut lp = frame_loop(n);
        run_to_close(&mut lp);

        let rec = lp.display();
        assert_eq!(lp.frames(), n as u64);
        assert_eq!(rec.count(|c| *c == Call::Upload), n);
        assert_eq!(rec.count(|c| *c == Call::Present), n);
        assert_eq!(rec.polls, n + 1);

        for (i, a) in rec.frames.iter().enumerate() {
            assert!(rec.frames[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn each_frame_composites_target_then_overlay_then_presents() {
        let mut lp = frame_loop(2);
        run_to_close(&mut lp);

        let one_frame = [
            Call::Upload,
            Call::UploadOverlay,
            Call::Draw(Layer::Target, (0, 0)),
            Call::Draw(Layer::Overlay, (0, 10)),
            Call::Present,
        ];
        let calls = &lp.display().calls;
        assert_eq!(calls.len(), 10);
        assert_eq!(&calls[..5], &one_frame);
        assert_eq!(&calls[5..], &one_frame);
    }

    #[test]
    fn overlay_is_redrawn_every_frame() {
        let mut lp = frame_loop(3);
        run_to_close(&mut lp);

        let texts = &lp.display().texts;
        assert_eq!(texts.len(), 3);
        for surface in texts {
            assert_eq!(surface.width(), 512);
            assert!(surface.as_bytes().chunks_exact(4).any(|p| p == [0, 0, 0, 0xff]));
        }
    }

    #[test]
    fn closed_is_terminal() {
        let mut lp = frame_loop(1);
        assert_eq!(lp.step().unwrap(), LoopState::Running);
        assert_eq!(lp.step().unwrap(), LoopState::Closed);

        let polls = lp.display().polls;
        assert_eq!(lp.step().unwrap(), LoopState::Closed);
        assert_eq!(lp.state(), LoopState::Closed);
        assert_eq!(lp.display().polls, polls);
        assert_eq!(lp.frames(), 1);
    }

    #[test]
    fn run_returns_ok_on_close() {
        frame_loop(2).run().unwrap();
    }

    /// Closes on poll number `close_on` and otherwise does nothing.
    struct Blank {
        polls: usize,
        close_on: usize,
    }

    impl Display for Blank {
        fn poll_close(&mut self) -> bool {
            self.polls += 1;
            self.polls > self.close_on
        }

        fn upload_frame(&mut self, _frame: &FrameBuffer) -> Result<()> {
            Ok(())
        }

        fn upload_overlay(&mut self, _overlay: &OverlaySurface) -> Result<()> {
            Ok(())
        }

        fn draw(&mut self, _layer: Layer, _origin: (i32, i32)) {}

        fn present(&mut self) {}
    }

    #[test]
    fn loop_body_never_waits() {
        let frames = 300;
        // small frames keep the fill cheap in debug builds
        let config = Config {
            width: 32,
            height: 32,
            ..Config::default()
        };
        let mut lp = FrameLoop::new(
            Blank {
                polls: 0,
                close_on: frames,
            },
            StdRng::seed_from_u64(5),
            config,
        );

        let start = Instant::now();
        while lp.step().unwrap() == LoopState::Running {}
        let elapsed = start.elapsed();

        assert_eq!(lp.frames(), frames as u64);
        // a 60 Hz cap would need 5 s for this many frames
        let capped = Duration::from_secs_f64(frames as f64 / 60.0);
        assert!(elapsed < capped / 4, "{frames} frames took {elapsed:?}");
    }
}
