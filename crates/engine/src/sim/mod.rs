//! Frame-driven side-scroller simulation.
//!
//! [`Session`] owns all mutable simulation state and advances it one tick at a
//! time. Presentation reads [`RenderFrame`] snapshots and never touches the
//! session directly.

pub mod camera;
mod clock;
mod input;
pub mod mount;
pub mod parallax;
pub mod physics;
mod render_sink;
mod state;

use tracing::{debug, info};

use crate::config::WorldConfig;

pub(crate) use input::ActionStates;

pub use clock::{FrameClock, TimeStep, FIXED_STEP_DT};
pub use input::{InputAction, InputState};
pub use mount::{MountController, ToggleOutcome};
pub use parallax::{ParallaxOutput, ParallaxScheduler};
pub use render_sink::{MountView, RenderFrame};
pub use state::{CameraState, MountEntity, MountKind, PlayerState, Vec2};

#[derive(Debug, Clone)]
pub struct Session {
    config: WorldConfig,
    clock: FrameClock,
    player: PlayerState,
    mounts: MountController,
    camera: CameraState,
    parallax: ParallaxScheduler,
    debug: bool,
    tick: u64,
}

impl Session {
    /// Starts a session with the player standing unmounted at
    /// `player_start_x`. The config is expected to have passed
    /// [`WorldConfig::validate`].
    pub fn new(config: WorldConfig) -> Self {
        let player = PlayerState::grounded(config.player_start_x, config.ground_y);
        let mounts = MountController::new(&config);
        let parallax = ParallaxScheduler::new(&config.parallax);
        let clock = FrameClock::new(config.time_step);
        info!(
            time_step = ?clock.mode(),
            camera = ?config.camera,
            mount_count = mounts.entities().len(),
            parallax_layers = config.parallax.layer_count(),
            world_width = config.world_width,
            "session_started"
        );
        Self {
            clock,
            config,
            player,
            mounts,
            camera: CameraState::default(),
            parallax,
            debug: false,
            tick: 0,
        }
    }

    /// Samples the clock at `timestamp_ms` and advances one tick. Returns the
    /// dt that was applied.
    pub fn tick(&mut self, timestamp_ms: f64, input: &InputState) -> f32 {
        let dt = self.clock.tick(timestamp_ms);
        self.step(dt, input);
        dt
    }

    /// Forgets the last clock sample so the next delta tick yields 0.
    pub fn resync_clock(&mut self) {
        self.clock.reset();
    }

    /// Advances one tick with an explicit dt, bypassing the clock.
    pub fn step(&mut self, dt: f32, input: &InputState) {
        let dt = dt.max(0.0);
        self.tick = self.tick.saturating_add(1);

        if input.toggle_debug_pressed() {
            self.debug = !self.debug;
            debug!(tick = self.tick, debug = self.debug, "debug_toggled");
        }

        let speed_multiplier = self.mounts.speed_multiplier(&self.config);
        self.player = physics::step(
            self.player,
            input,
            dt,
            speed_multiplier,
            self.debug,
            &self.config,
        );

        if input.toggle_mount_pressed() {
            let from = self.mounts.state();
            let to = self
                .mounts
                .toggle(self.player.position.x, self.config.mount_capture_radius);
            self.player.mount = to;
            match ToggleOutcome::between(from, to) {
                ToggleOutcome::OutOfReach => debug!(
                    tick = self.tick,
                    player_x = self.player.position.x,
                    "mount_out_of_reach"
                ),
                ToggleOutcome::Mounted(_) | ToggleOutcome::Dismounted(_) => debug!(
                    tick = self.tick,
                    from = from.as_token(),
                    to = to.as_token(),
                    player_x = self.player.position.x,
                    "mount_changed"
                ),
            }
        }
        self.mounts.sync_ridden(&self.player);

        self.camera = camera::follow(
            self.config.camera,
            self.camera,
            self.player.position.x,
            dt,
            &self.config,
        );
        self.parallax.update(&self.config.parallax, input);
    }

    pub fn render_frame(&self) -> RenderFrame {
        let ridden = self.mounts.state();
        RenderFrame {
            tick: self.tick,
            player_x: self.player.position.x,
            player_y: self.player.position.y,
            mount_kind: self.player.mount,
            rider_offset: self.player.mount.rider_offset(),
            mounts: self
                .mounts
                .entities()
                .iter()
                .map(|entity| MountView {
                    kind: entity.kind,
                    position: entity.position,
                    ridden: entity.kind == ridden,
                })
                .collect(),
            camera_x: self.camera.x,
            parallax: self.parallax.output(&self.config.parallax, self.camera.x),
            debug: self.debug,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn mounts(&self) -> &MountController {
        &self.mounts
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn parallax(&self) -> &ParallaxScheduler {
        &self.parallax
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}
