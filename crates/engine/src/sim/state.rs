use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What the player is currently riding. `None` doubles as the unmounted state
/// of the mount state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountKind {
    #[default]
    None,
    Bike,
    Horse,
}

const RIDER_OFFSET_NONE: Vec2 = Vec2::ZERO;
const RIDER_OFFSET_BIKE: Vec2 = Vec2::new(0.0, -24.0);
const RIDER_OFFSET_HORSE: Vec2 = Vec2::new(0.0, -48.0);

impl MountKind {
    pub const fn is_mounted(self) -> bool {
        !matches!(self, MountKind::None)
    }

    /// Tie-break for mount capture: at equal distance the lower value wins,
    /// so a bike is preferred over a horse.
    pub const fn capture_priority(self) -> u8 {
        match self {
            MountKind::Bike => 0,
            MountKind::Horse => 1,
            MountKind::None => u8::MAX,
        }
    }

    /// Screen-space shift applied to the rider sprite while mounted.
    pub const fn rider_offset(self) -> Vec2 {
        match self {
            MountKind::None => RIDER_OFFSET_NONE,
            MountKind::Bike => RIDER_OFFSET_BIKE,
            MountKind::Horse => RIDER_OFFSET_HORSE,
        }
    }

    pub const fn as_token(self) -> &'static str {
        match self {
            MountKind::None => "none",
            MountKind::Bike => "bike",
            MountKind::Horse => "horse",
        }
    }
}

/// Player kinematics. `position.y` grows downward; the ground line is the
/// largest y the player may occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub on_ground: bool,
    pub mount: MountKind,
}

impl PlayerState {
    pub fn grounded(x: f32, ground_y: f32) -> Self {
        Self {
            position: Vec2::new(x, ground_y),
            velocity: Vec2::ZERO,
            on_ground: true,
            mount: MountKind::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountEntity {
    pub kind: MountKind,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraState {
    pub x: f32,
}

/// Clamps `value` into `[0, extent - size]`. A negative span collapses to 0
/// instead of panicking.
pub(crate) fn clamp_to_span(value: f32, extent: f32, size: f32) -> f32 {
    let max = (extent - size).max(0.0);
    value.clamp(0.0, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bike_outranks_horse_for_capture() {
        assert!(MountKind::Bike.capture_priority() < MountKind::Horse.capture_priority());
        assert!(MountKind::Horse.capture_priority() < MountKind::None.capture_priority());
    }

    #[test]
    fn rider_offset_table_is_zero_only_when_unmounted() {
        assert_eq!(MountKind::None.rider_offset(), Vec2::ZERO);
        assert!(MountKind::Bike.rider_offset().y < 0.0);
        assert!(MountKind::Horse.rider_offset().y < MountKind::Bike.rider_offset().y);
    }

    #[test]
    fn clamp_to_span_handles_inverted_bounds() {
        assert_eq!(clamp_to_span(50.0, 100.0, 300.0), 0.0);
        assert_eq!(clamp_to_span(-5.0, 1000.0, 100.0), 0.0);
        assert_eq!(clamp_to_span(950.0, 1000.0, 100.0), 900.0);
        assert_eq!(clamp_to_span(400.0, 1000.0, 100.0), 400.0);
    }

    #[test]
    fn grounded_player_satisfies_ground_invariant() {
        let player = PlayerState::grounded(120.0, 880.0);
        assert!(player.on_ground);
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.position.y, 880.0);
        assert_eq!(player.mount, MountKind::None);
    }
}
