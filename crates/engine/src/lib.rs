//! Side-scroller movement engine: a pure per-tick simulation ([`Session`])
//! and a winit/pixels presentation loop ([`run_app`]) that drives it.

pub mod app;
pub mod config;
pub mod sim;

pub use app::{run_app, AppError, LoopConfig, LoopMetricsSnapshot, Viewport};
pub use config::{
    CameraPolicy, ConfigError, ConfigPreset, MountSpawn, ParallaxMode, WorldConfig, ALL_PRESETS,
};
pub use sim::{
    CameraState, FrameClock, InputAction, InputState, MountEntity, MountKind, MountView,
    ParallaxOutput, PlayerState, RenderFrame, Session, TimeStep, Vec2, FIXED_STEP_DT,
};
