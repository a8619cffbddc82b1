use serde::{Deserialize, Serialize};

/// Tick duration reported in fixed-step mode, in "ticks".
pub const FIXED_STEP_DT: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStep {
    /// Seconds elapsed between consecutive timestamps.
    #[default]
    Delta,
    /// Every tick counts as one unit regardless of wall time.
    Fixed,
}

/// Turns a stream of millisecond timestamps into per-tick deltas.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    mode: TimeStep,
    last_timestamp_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(mode: TimeStep) -> Self {
        Self {
            mode,
            last_timestamp_ms: None,
        }
    }

    pub fn mode(&self) -> TimeStep {
        self.mode
    }

    /// Returns the delta for this tick. The first delta-mode tick yields 0.
    /// Gaps are not capped; a timestamp that goes backwards yields 0.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let previous = self.last_timestamp_ms.replace(timestamp_ms);
        match self.mode {
            TimeStep::Fixed => FIXED_STEP_DT,
            TimeStep::Delta => match previous {
                None => 0.0,
                Some(last) => (((timestamp_ms - last) / 1000.0) as f32).max(0.0),
            },
        }
    }

    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }
}
