use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of recent frame intervals averaged into the estimate.
pub const FPS_WINDOW: usize = 10;

/// Rolling frames-per-second estimate over the last [`FPS_WINDOW`] frames.
#[derive(Debug, Default)]
pub struct FpsCounter {
    last_tick: Option<Instant>,
    intervals: VecDeque<Duration>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            last_tick: None,
            intervals: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(last) = self.last_tick {
            if self.intervals.len() == FPS_WINDOW {
                self.intervals.pop_front();
            }
            self.intervals.push_back(now.saturating_duration_since(last));
        }
        self.last_tick = Some(now);
    }

    pub fn fps(&self) -> f32 {
        let total: Duration = self.intervals.iter().sum();
        if self.intervals.is_empty() || total.is_zero() {
            return 0.0;
        }
        self.intervals.len() as f32 / total.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(counter: &mut FpsCounter, start: Instant, step: Duration, n: u32) -> Instant {
        let mut now = start;
        for _ in 0..n {
            counter.tick_at(now);
            now += step;
        }
        now
    }

    #[test]
    fn reports_zero_until_an_interval_exists() {
        let mut counter = FpsCounter::new();
        assert_eq!(counter.fps(), 0.0);

        counter.tick_at(Instant::now());
        assert_eq!(counter.fps(), 0.0);
    }

    #[test]
    fn steady_ticks_give_their_rate() {
        let mut counter = FpsCounter::new();
        ticks(&mut counter, Instant::now(), Duration::from_millis(20), 5);
        assert!((counter.fps() - 50.0).abs() < 0.01, "{}", counter.fps());
    }

    #[test]
    fn only_the_last_ten_intervals_count() {
        let mut counter = FpsCounter::new();
        let now = ticks(&mut counter, Instant::now(), Duration::from_secs(1), 5);
        ticks(&mut counter, now, Duration::from_millis(10), 11);

        assert_eq!(counter.intervals.len(), FPS_WINDOW);
        assert!((counter.fps() - 100.0).abs() < 0.01, "{}", counter.fps());
    }

    #[test]
    fn identical_timestamps_do_not_divide_by_zero() {
        let mut counter = FpsCounter::new();
        let now = Instant::now();
        counter.tick_at(now);
        counter.tick_at(now);
        assert_eq!(counter.fps(), 0.0);
    }
}
