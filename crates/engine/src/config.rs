use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{MountKind, TimeStep};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraPolicy {
    /// Push-scroll: the camera moves only when the player enters a margin of
    /// `width` at either viewport edge.
    DeadZone { width: f32 },
    /// Exponential follow applied once per tick, independent of dt.
    Smooth { factor: f32 },
    /// Exponential follow scaled by dt; equals `Smooth` when
    /// `dt == 1 / reference_hz`.
    SmoothScaled { factor: f32, reference_hz: f32 },
    /// Hard follow keeping the player's left edge at the viewport center.
    CenterLock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParallaxMode {
    Position {
        layer_count: usize,
        layer_factor: f32,
    },
    Speed {
        base_durations: Vec<f32>,
        min_speed: f32,
        max_speed: f32,
        speed_step: f32,
        initial_speed: f32,
    },
}

impl ParallaxMode {
    pub fn layer_count(&self) -> usize {
        match self {
            ParallaxMode::Position { layer_count, .. } => *layer_count,
            ParallaxMode::Speed { base_durations, .. } => base_durations.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MountSpawn {
    pub kind: MountKind,
    pub x: f32,
}

/// Session constants. Lengths are in world pixels; speeds and accelerations are
/// per second in `TimeStep::Delta` and per tick in `TimeStep::Fixed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub base_speed: f32,
    pub mount_speed_multiplier: f32,
    pub debug_speed_multiplier: f32,
    pub world_width: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub ground_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_start_x: f32,
    pub mount_capture_radius: f32,
    pub mounts: Vec<MountSpawn>,
    pub time_step: TimeStep,
    pub camera: CameraPolicy,
    pub parallax: ParallaxMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        ConfigPreset::Stable.world_config()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("world_width ({world_width}) must be at least viewport_width ({viewport_width})")]
    WorldNarrowerThanViewport {
        world_width: f32,
        viewport_width: f32,
    },
    #[error("{field} must be in (0, 1], got {value}")]
    FactorOutOfRange { field: &'static str, value: f32 },
    #[error("parallax mode has no layers")]
    NoParallaxLayers,
    #[error("parallax min_speed ({min}) must not exceed max_speed ({max})")]
    InvertedSpeedRange { min: f32, max: f32 },
    #[error("parallax initial_speed ({initial}) must lie in [{min}, {max}]")]
    InitialSpeedOutOfRange { initial: f32, min: f32, max: f32 },
    #[error("mount kind '{}' cannot be spawned", .kind.as_token())]
    UnrideableMount { kind: MountKind },
    #[error("mount kind '{}' is configured more than once", .kind.as_token())]
    DuplicateMount { kind: MountKind },
    #[error("{what} ({value}) lies outside the world [0, {max}]")]
    OutsideWorld { what: String, value: f32, max: f32 },
    #[error("dead zone width ({width}) must be at most half of viewport_width ({viewport_width})")]
    DeadZoneTooWide { width: f32, viewport_width: f32 },
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("viewport_width", self.viewport_width)?;
        require_positive("viewport_height", self.viewport_height)?;
        require_positive("world_width", self.world_width)?;
        require_positive("player_width", self.player_width)?;
        require_positive("player_height", self.player_height)?;
        require_positive("mount_speed_multiplier", self.mount_speed_multiplier)?;
        require_positive("debug_speed_multiplier", self.debug_speed_multiplier)?;
        require_non_negative("gravity", self.gravity)?;
        require_non_negative("jump_impulse", self.jump_impulse)?;
        require_non_negative("base_speed", self.base_speed)?;
        require_non_negative("ground_y", self.ground_y)?;
        require_non_negative("mount_capture_radius", self.mount_capture_radius)?;

        if self.world_width < self.viewport_width {
            return Err(ConfigError::WorldNarrowerThanViewport {
                world_width: self.world_width,
                viewport_width: self.viewport_width,
            });
        }

        let max_x = (self.world_width - self.player_width).max(0.0);
        require_inside_world("player_start_x".to_string(), self.player_start_x, max_x)?;

        let mut seen = Vec::with_capacity(self.mounts.len());
        for (index, spawn) in self.mounts.iter().enumerate() {
            if !spawn.kind.is_mounted() {
                return Err(ConfigError::UnrideableMount { kind: spawn.kind });
            }
            if seen.contains(&spawn.kind) {
                return Err(ConfigError::DuplicateMount { kind: spawn.kind });
            }
            seen.push(spawn.kind);
            require_inside_world(format!("mounts[{index}].x"), spawn.x, max_x)?;
        }

        self.validate_camera()?;
        self.validate_parallax()
    }

    fn validate_camera(&self) -> Result<(), ConfigError> {
        match self.camera {
            CameraPolicy::DeadZone { width } => {
                require_non_negative("camera.width", width)?;
                // Wider margins overlap and both edges would push every tick.
                if 2.0 * width > self.viewport_width {
                    return Err(ConfigError::DeadZoneTooWide {
                        width,
                        viewport_width: self.viewport_width,
                    });
                }
                Ok(())
            }
            CameraPolicy::Smooth { factor } => require_factor("camera.factor", factor),
            CameraPolicy::SmoothScaled {
                factor,
                reference_hz,
            } => {
                require_factor("camera.factor", factor)?;
                require_positive("camera.reference_hz", reference_hz)
            }
            CameraPolicy::CenterLock => Ok(()),
        }
    }

    fn validate_parallax(&self) -> Result<(), ConfigError> {
        match &self.parallax {
            ParallaxMode::Position {
                layer_count,
                layer_factor,
            } => {
                if *layer_count == 0 {
                    return Err(ConfigError::NoParallaxLayers);
                }
                require_non_negative("parallax.layer_factor", *layer_factor)
            }
            ParallaxMode::Speed {
                base_durations,
                min_speed,
                max_speed,
                speed_step,
                initial_speed,
            } => {
                if base_durations.is_empty() {
                    return Err(ConfigError::NoParallaxLayers);
                }
                for duration in base_durations {
                    require_positive("parallax.base_durations[]", *duration)?;
                }
                require_positive("parallax.min_speed", *min_speed)?;
                require_positive("parallax.max_speed", *max_speed)?;
                require_non_negative("parallax.speed_step", *speed_step)?;
                if min_speed > max_speed {
                    return Err(ConfigError::InvertedSpeedRange {
                        min: *min_speed,
                        max: *max_speed,
                    });
                }
                if !(min_speed..=max_speed).contains(&initial_speed) {
                    return Err(ConfigError::InitialSpeedOutOfRange {
                        initial: *initial_speed,
                        min: *min_speed,
                        max: *max_speed,
                    });
                }
                Ok(())
            }
        }
    }

    pub fn mount_spawn(&self, kind: MountKind) -> Option<&MountSpawn> {
        self.mounts.iter().find(|spawn| spawn.kind == kind)
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn require_factor(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { field, value })
    }
}

fn require_inside_world(what: String, value: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutsideWorld { what, value, max })
    }
}

/// Named configurations matching the historical builds of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigPreset {
    /// Tick-based movement, centered camera, no mounts.
    Classic,
    /// Seconds-based movement with a single bike and a push-scroll camera.
    Bike,
    /// Bike and horse with a smoothed camera.
    Stable,
    /// Bike and horse with an input-driven background speed.
    Treadmill,
}

pub const ALL_PRESETS: [ConfigPreset; 4] = [
    ConfigPreset::Classic,
    ConfigPreset::Bike,
    ConfigPreset::Stable,
    ConfigPreset::Treadmill,
];

const VIEWPORT_WIDTH: f32 = 1920.0;
const VIEWPORT_HEIGHT: f32 = 1080.0;
const WORLD_WIDTH: f32 = 5000.0;
const GROUND_Y: f32 = 880.0;
const PLAYER_WIDTH: f32 = 100.0;
const PLAYER_HEIGHT: f32 = 150.0;
const PARALLAX_LAYER_COUNT: usize = 3;
const PARALLAX_LAYER_FACTOR: f32 = 0.2;

impl ConfigPreset {
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_PRESETS
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigPreset::Classic => "classic",
            ConfigPreset::Bike => "bike",
            ConfigPreset::Stable => "stable",
            ConfigPreset::Treadmill => "treadmill",
        }
    }

    pub fn world_config(self) -> WorldConfig {
        let seconds_based = WorldConfig {
            gravity: 1800.0,
            jump_impulse: 900.0,
            base_speed: 300.0,
            mount_speed_multiplier: 2.0,
            debug_speed_multiplier: 3.0,
            world_width: WORLD_WIDTH,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            ground_y: GROUND_Y,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_start_x: 100.0,
            mount_capture_radius: 100.0,
            mounts: vec![
                MountSpawn {
                    kind: MountKind::Bike,
                    x: 600.0,
                },
                MountSpawn {
                    kind: MountKind::Horse,
                    x: 1400.0,
                },
            ],
            time_step: TimeStep::Delta,
            camera: CameraPolicy::Smooth { factor: 0.05 },
            parallax: ParallaxMode::Position {
                layer_count: PARALLAX_LAYER_COUNT,
                layer_factor: PARALLAX_LAYER_FACTOR,
            },
        };

        match self {
            ConfigPreset::Classic => WorldConfig {
                gravity: 0.5,
                jump_impulse: 15.0,
                base_speed: 5.0,
                mounts: Vec::new(),
                time_step: TimeStep::Fixed,
                camera: CameraPolicy::CenterLock,
                ..seconds_based
            },
            ConfigPreset::Bike => WorldConfig {
                mounts: vec![MountSpawn {
                    kind: MountKind::Bike,
                    x: 600.0,
                }],
                camera: CameraPolicy::DeadZone { width: 600.0 },
                ..seconds_based
            },
            ConfigPreset::Stable => seconds_based,
            ConfigPreset::Treadmill => WorldConfig {
                parallax: ParallaxMode::Speed {
                    base_durations: vec![60.0, 40.0, 20.0],
                    min_speed: 0.25,
                    max_speed: 4.0,
                    speed_step: 0.05,
                    initial_speed: 1.0,
                },
                ..seconds_based
            },
        }
    }
}
