use std::time::{Duration, Instant};

const MIN_STEP: Duration = Duration::from_nanos(1);

/// Fixed-timestep configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimestepConfig {
    /// Simulation increment. 16 ms approximates a 60 Hz cadence.
    pub step: Duration,

    /// Upper bound on steps run by a single `tick`.
    ///
    /// `None` replays all elapsed time, however long the loop was suspended.
    /// When set, whole steps beyond the cap are discarded and only the sub-step
    /// remainder is carried.
    pub max_catch_up_steps: Option<u32>,
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            step: Duration::from_millis(16),
            max_catch_up_steps: None,
        }
    }
}

/// Timing snapshot for one presented frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Monotonic frame counter, advanced once per presentation attempt.
    pub frame_index: u64,

    /// Simulation steps run since the previous frame.
    pub steps: u32,

    /// Fixed step duration.
    pub step: Duration,

    /// Unconsumed fraction of a step in `[0, 1)`, for interpolation.
    pub alpha: f32,

    /// Monotonic timestamp taken before rendering.
    pub now: Instant,
}

/// Accumulates wall-clock time and releases it in fixed increments.
///
/// The driver runs regardless of whether a surface exists, so simulation time
/// keeps advancing while the app has no window.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    max_catch_up_steps: Option<u32>,
    last: Instant,
    accumulator: Duration,
    total_steps: u64,
}

impl FixedStep {
    /// Creates a driver whose first sample is taken now.
    pub fn new(config: TimestepConfig) -> Self {
        Self::starting_at(config, Instant::now())
    }

    /// Creates a driver with an explicit first sample.
    ///
    /// A zero `config.step` is raised to 1 ns so the accumulator always drains.
    pub fn starting_at(config: TimestepConfig, start: Instant) -> Self {
        Self {
            step: config.step.max(MIN_STEP),
            max_catch_up_steps: config.max_catch_up_steps,
            last: start,
            accumulator: Duration::ZERO,
            total_steps: 0,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Elapsed time not yet consumed by a step.
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Steps run since creation.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Fraction of a step currently accumulated, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f64() / self.step.as_secs_f64()) as f32
    }

    /// Adds `now - last_sample` to the accumulator and calls `advance` once per
    /// whole step it contains. Returns the number of steps taken.
    ///
    /// A `now` earlier than the last sample contributes nothing.
    pub fn tick<F>(&mut self, now: Instant, mut advance: F) -> u32
    where
        F: FnMut(Duration),
    {
        self.accumulator += now.saturating_duration_since(self.last);
        self.last = self.last.max(now);

        let mut steps = 0u32;
        while self.accumulator >= self.step {
            if self.max_catch_up_steps.is_some_and(|cap| steps >= cap) {
                self.discard_backlog();
                break;
            }
            advance(self.step);
            self.accumulator -= self.step;
            steps += 1;
        }

        self.total_steps += u64::from(steps);
        steps
    }

    fn discard_backlog(&mut self) {
        let step = self.step.as_nanos();
        let backlog = self.accumulator.as_nanos();
        log::debug!("timestep catch-up capped; dropping {} steps", backlog / step);
        self.accumulator = Duration::from_nanos((backlog % step) as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn driver(cap: Option<u32>) -> (FixedStep, Instant) {
        let t0 = Instant::now();
        let config = TimestepConfig { step: ms(16), max_catch_up_steps: cap };
        (FixedStep::starting_at(config, t0), t0)
    }

    // ── stepping ──────────────────────────────────────────────────────────

    #[test]
    fn fifty_ms_is_three_steps_with_two_ms_left() {
        let (mut d, t0) = driver(None);
        let mut calls = 0;
        assert_eq!(d.tick(t0 + ms(50), |_| calls += 1), 3);
        assert_eq!(calls, 3);
        assert_eq!(d.accumulator(), ms(2));
    }

    #[test]
    fn zero_elapsed_is_zero_steps() {
        let (mut d, t0) = driver(None);
        assert_eq!(d.tick(t0, |_| panic!("no step expected")), 0);
        assert_eq!(d.accumulator(), Duration::ZERO);
    }

    #[test]
    fn remainder_carries_into_next_tick() {
        let (mut d, t0) = driver(None);
        assert_eq!(d.tick(t0 + ms(10), |_| {}), 0);
        assert_eq!(d.tick(t0 + ms(20), |_| {}), 1);
        assert_eq!(d.accumulator(), ms(4));
    }

    #[test]
    fn irregular_sampling_matches_single_sample() {
        let (mut irregular, t0) = driver(None);
        let total: u32 = [3, 17, 18, 40, 41, 97]
            .iter()
            .map(|&t| irregular.tick(t0 + ms(t), |_| {}))
            .sum();

        let (mut single, t1) = driver(None);
        assert_eq!(total, single.tick(t1 + ms(97), |_| {}));
        assert_eq!(irregular.accumulator(), single.accumulator());
    }

    #[test]
    fn each_step_receives_fixed_duration() {
        let (mut d, t0) = driver(None);
        let mut seen = Vec::new();
        d.tick(t0 + ms(33), |dt| seen.push(dt));
        assert_eq!(seen, vec![ms(16), ms(16)]);
    }

    #[test]
    fn clock_going_backwards_adds_nothing() {
        let (mut d, t0) = driver(None);
        d.tick(t0 + ms(20), |_| {});
        assert_eq!(d.tick(t0 + ms(5), |_| {}), 0);
        assert_eq!(d.tick(t0 + ms(32), |_| {}), 1);
    }

    // ── catch-up ──────────────────────────────────────────────────────────

    #[test]
    fn long_suspend_replays_every_step_uncapped() {
        let (mut d, t0) = driver(None);
        assert_eq!(d.tick(t0 + ms(1000), |_| {}), 62);
        assert_eq!(d.accumulator(), ms(8));
        assert_eq!(d.total_steps(), 62);
    }

    #[test]
    fn cap_discards_backlog_but_keeps_remainder() {
        let (mut d, t0) = driver(Some(5));
        assert_eq!(d.tick(t0 + ms(1000), |_| {}), 5);
        assert_eq!(d.accumulator(), ms(8));
        assert_eq!(d.tick(t0 + ms(1016), |_| {}), 1);
    }

    #[test]
    fn zero_step_is_raised_to_one_nanosecond() {
        let t0 = Instant::now();
        let config = TimestepConfig { step: Duration::ZERO, max_catch_up_steps: None };
        let mut d = FixedStep::starting_at(config, t0);

        assert_eq!(d.step(), Duration::from_nanos(1));
        assert_eq!(d.tick(t0 + Duration::from_nanos(5), |_| {}), 5);
        assert_eq!(d.accumulator(), Duration::ZERO);
    }

    #[test]
    fn alpha_is_fraction_of_step() {
        let (mut d, t0) = driver(None);
        d.tick(t0 + ms(24), |_| {});
        assert!((d.alpha() - 0.5).abs() < 1e-6);
    }
}
