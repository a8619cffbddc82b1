use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::config::{ConfigError, WorldConfig};
use crate::sim::{ActionStates, InputAction, InputState, RenderFrame, Session};

use super::metrics::MetricsAccumulator;
use super::rendering::{Renderer, SceneGeometry, Viewport};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub max_render_fps: Option<u32>,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Side Scroller".to_string(),
            window_width: 1280,
            window_height: 720,
            max_render_fps: None,
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, world_config: WorldConfig) -> Result<(), AppError> {
    world_config.validate()?;

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let viewport =
        Viewport::from_world_size(world_config.viewport_width, world_config.viewport_height);
    let mut renderer = Renderer::new(
        Arc::clone(&window),
        viewport,
        SceneGeometry::from_config(&world_config),
    )
    .map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);
    let mut input_collector = InputCollector::default();
    let mut session = Session::new(world_config);

    info!(
        viewport_width = viewport.width,
        viewport_height = viewport.height,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let started = Instant::now();
    let mut last_frame_instant = started;
    let mut last_present_instant = started;
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut last_applied_title: Option<String> = None;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::Focused(false) => input_collector.release_all(),
                WindowEvent::Focused(true) => session.resync_clock(),
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;

                    let input = input_collector.snapshot_for_tick();
                    let timestamp_ms =
                        now.saturating_duration_since(started).as_secs_f64() * 1000.0;
                    let sim_dt = session.tick(timestamp_ms, &input);
                    let frame = session.render_frame();

                    // Single authoritative FPS cap sleep point for render pacing.
                    let elapsed_since_last_present =
                        Instant::now().saturating_duration_since(last_present_instant);
                    let cap_sleep =
                        compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    if let Err(error) = renderer.render(&frame, raw_frame_dt.as_secs_f32()) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present_instant = Instant::now();

                    let next_title = window_title_for(&config.window_title, &frame);
                    if last_applied_title.as_deref() != Some(next_title.as_str()) {
                        window.set_title(&next_title);
                        last_applied_title = Some(next_title);
                    }

                    metrics_accumulator.record_frame(raw_frame_dt, sim_dt);
                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        info!(
                            fps = snapshot.fps,
                            mean_frame_ms = snapshot.mean_frame_ms,
                            max_frame_ms = snapshot.max_frame_ms,
                            mean_sim_dt = snapshot.mean_sim_dt,
                            tick = frame.tick,
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!(ticks = session.tick_count(), "shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Debug mode shows the full status line; otherwise only the mount.
fn window_title_for(base: &str, frame: &RenderFrame) -> String {
    if frame.debug {
        format!("{base} | {}", frame.status_line())
    } else {
        format!("{base} | mount {}", frame.mount_kind.as_token())
    }
}

/// Latches a key so a press reports once until it is released again, even
/// while the OS repeats it.
#[derive(Debug, Default, Clone, Copy)]
struct EdgeLatch {
    is_down: bool,
    pressed_edge: bool,
}

impl EdgeLatch {
    fn handle(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.is_down {
                    self.pressed_edge = true;
                }
                self.is_down = true;
            }
            ElementState::Released => self.is_down = false,
        }
    }

    fn take(&mut self) -> bool {
        std::mem::take(&mut self.pressed_edge)
    }
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    held: ActionStates,
    toggle_mount: EdgeLatch,
    toggle_debug: EdgeLatch,
}

impl InputCollector {
    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        self.update_from_physical_key(key_event.physical_key, key_event.state);
    }

    fn update_from_physical_key(&mut self, key: PhysicalKey, state: ElementState) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        if code == KeyCode::Escape {
            if state == ElementState::Pressed {
                self.quit_requested = true;
            }
            return;
        }
        let Some(action) = key_action(code) else {
            return;
        };
        if action.is_edge() {
            if let Some(latch) = self.latch_mut(action) {
                latch.handle(state);
            }
        } else {
            self.held.set(action, state == ElementState::Pressed);
        }
    }

    fn latch_mut(&mut self, action: InputAction) -> Option<&mut EdgeLatch> {
        match action {
            InputAction::ToggleMount => Some(&mut self.toggle_mount),
            InputAction::ToggleDebug => Some(&mut self.toggle_debug),
            _ => None,
        }
    }

    /// Drops held keys when the window loses focus, since their release
    /// events go elsewhere.
    fn release_all(&mut self) {
        self.held = ActionStates::default();
        self.toggle_mount.is_down = false;
        self.toggle_debug.is_down = false;
    }

    fn snapshot_for_tick(&mut self) -> InputState {
        let mut actions = self.held;
        actions.set(InputAction::ToggleMount, self.toggle_mount.take());
        actions.set(InputAction::ToggleDebug, self.toggle_debug.take());
        InputState::from_actions(actions)
    }
}

fn key_action(code: KeyCode) -> Option<InputAction> {
    match code {
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(InputAction::MoveLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(InputAction::MoveRight),
        KeyCode::KeyW | KeyCode::ArrowUp | KeyCode::Space => Some(InputAction::Jump),
        KeyCode::KeyB => Some(InputAction::ToggleMount),
        KeyCode::F3 => Some(InputAction::ToggleDebug),
        _ => None,
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}
