use std::time::Duration;

const FALLBACK_STEP: Duration = Duration::from_nanos(16_666_667);

/// Turns wall-clock deltas into a whole number of fixed simulation ticks.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
    max_catch_up: u32,
}

impl FixedStep {
    /// Rates whose step does not fit a `Duration` fall back to 60 Hz. The step
    /// is never zero.
    pub fn new(tick_hz: f32, max_catch_up: u32) -> Self {
        let step = Duration::try_from_secs_f32(1.0 / tick_hz).unwrap_or_else(|e| {
            log::warn!("tick rate {tick_hz} is unusable ({e}), falling back to 60 Hz");
            FALLBACK_STEP
        });
        Self {
            step: step.max(Duration::from_nanos(1)),
            accumulator: Duration::ZERO,
            max_catch_up: max_catch_up.max(1),
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Adds `elapsed` and returns how many ticks are due. A backlog larger than
    /// `max_catch_up` ticks is dropped.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let step = self.step.as_nanos();
        let due = self.accumulator.as_nanos() / step;
        self.accumulator = Duration::from_nanos((self.accumulator.as_nanos() % step) as u64);

        let max = u128::from(self.max_catch_up);
        if due > max {
            log::warn!("simulation fell behind, dropping {} ticks", due - max);
            return self.max_catch_up;
        }
        due as u32
    }
}
