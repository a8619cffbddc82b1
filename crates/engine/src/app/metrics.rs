use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub mean_frame_ms: f32,
    pub max_frame_ms: f32,
    /// Mean simulation dt in the session's own units (seconds or ticks).
    pub mean_sim_dt: f32,
}

#[derive(Debug)]
pub(crate) struct MetricsAccumulator {
    interval_start: Instant,
    interval: Duration,
    frames: u32,
    frame_time_sum: Duration,
    frame_time_max: Duration,
    sim_dt_sum: f32,
}

impl MetricsAccumulator {
    pub(crate) fn new(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    fn starting_at(start: Instant, interval: Duration) -> Self {
        Self {
            interval_start: start,
            interval,
            frames: 0,
            frame_time_sum: Duration::ZERO,
            frame_time_max: Duration::ZERO,
            sim_dt_sum: 0.0,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration, sim_dt: f32) {
        self.frames = self.frames.saturating_add(1);
        self.frame_time_sum = self.frame_time_sum.saturating_add(frame_dt);
        self.frame_time_max = self.frame_time_max.max(frame_dt);
        self.sim_dt_sum += sim_dt;
    }

    pub(crate) fn maybe_snapshot(&mut self, now: Instant) -> Option<LoopMetricsSnapshot> {
        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < self.interval {
            return None;
        }

        let elapsed_seconds = elapsed.as_secs_f32().max(f32::EPSILON);
        let (mean_frame_ms, mean_sim_dt) = if self.frames == 0 {
            (0.0, 0.0)
        } else {
            let frames = self.frames as f32;
            (
                self.frame_time_sum.as_secs_f32() / frames * 1000.0,
                self.sim_dt_sum / frames,
            )
        };

        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / elapsed_seconds,
            mean_frame_ms,
            max_frame_ms: self.frame_time_max.as_secs_f32() * 1000.0,
            mean_sim_dt,
        };

        *self = Self::starting_at(now, self.interval);
        Some(snapshot)
    }
}
