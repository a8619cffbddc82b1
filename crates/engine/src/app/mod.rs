mod loop_runner;
mod metrics;
mod rendering;

pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{world_to_screen_px, wrap_offset, Renderer, SceneGeometry, Viewport};
