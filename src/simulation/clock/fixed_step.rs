/// Fixed-timestep accumulator
///
/// Wall time goes in, a whole number of `dt` steps comes out. Backlog beyond
/// `max_substeps` is dropped so a stalled tab doesn't fast-forward the banner.
#[derive(Clone, Debug)]
pub struct FixedStep {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
    dropped: u64,
}

impl FixedStep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            dropped: 0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Leftover fraction of a step, for interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// Total steps dropped so far
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Number of fixed steps to run for `elapsed` seconds of wall time
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed;

        let due = (self.accumulator / self.dt).floor();
        let due = if due > u32::MAX as f32 { u32::MAX } else { due as u32 };
        self.accumulator -= due as f32 * self.dt;
        // Float drift can leave a hair below zero
        self.accumulator = self.accumulator.max(0.0);

        if due > self.max_substeps {
            let dropped = due - self.max_substeps;
            self.dropped += dropped as u64;
            log::warn!("fixed step backlog: dropping {} of {} steps", dropped, due);
            return self.max_substeps;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
