use std::cmp::Ordering;

use crate::config::WorldConfig;

use super::state::{MountEntity, MountKind, PlayerState, Vec2};

/// Picks the mount the player would board from `player_x`.
///
/// Only mounts strictly inside `capture_radius` qualify. The closest one wins;
/// at equal distance [`MountKind::capture_priority`] decides.
pub fn nearest_in_reach(
    player_x: f32,
    mounts: &[MountEntity],
    capture_radius: f32,
) -> Option<MountKind> {
    mounts
        .iter()
        .filter(|mount| mount.kind.is_mounted())
        .map(|mount| (mount.kind, (player_x - mount.position.x).abs()))
        .filter(|(_, distance)| *distance < capture_radius)
        .min_by(|(kind_a, dist_a), (kind_b, dist_b)| {
            dist_a
                .partial_cmp(dist_b)
                .unwrap_or(Ordering::Equal)
                .then(kind_a.capture_priority().cmp(&kind_b.capture_priority()))
        })
        .map(|(kind, _)| kind)
}

/// State transition for one toggle press. Dismounting always succeeds.
pub fn resolve_toggle(
    current: MountKind,
    player_x: f32,
    mounts: &[MountEntity],
    capture_radius: f32,
) -> MountKind {
    if current.is_mounted() {
        return MountKind::None;
    }
    nearest_in_reach(player_x, mounts, capture_radius).unwrap_or(MountKind::None)
}

/// What a single toggle press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Mounted(MountKind),
    Dismounted(MountKind),
    /// Unmounted press with nothing inside the capture radius.
    OutOfReach,
}

impl ToggleOutcome {
    pub fn between(from: MountKind, to: MountKind) -> Self {
        match (from.is_mounted(), to.is_mounted()) {
            (true, _) => ToggleOutcome::Dismounted(from),
            (false, true) => ToggleOutcome::Mounted(to),
            (false, false) => ToggleOutcome::OutOfReach,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MountController {
    state: MountKind,
    entities: Vec<MountEntity>,
}

impl MountController {
    pub fn new(config: &WorldConfig) -> Self {
        let entities = config
            .mounts
            .iter()
            .map(|spawn| MountEntity {
                kind: spawn.kind,
                position: Vec2::new(spawn.x, config.ground_y),
            })
            .collect();
        Self::with_entities(entities)
    }

    pub fn with_entities(entities: Vec<MountEntity>) -> Self {
        Self {
            state: MountKind::None,
            entities,
        }
    }

    pub fn state(&self) -> MountKind {
        self.state
    }

    pub fn entities(&self) -> &[MountEntity] {
        &self.entities
    }

    pub fn entity(&self, kind: MountKind) -> Option<&MountEntity> {
        self.entities.iter().find(|entity| entity.kind == kind)
    }

    /// Applies a toggle press and returns the new state.
    pub fn toggle(&mut self, player_x: f32, capture_radius: f32) -> MountKind {
        self.state = resolve_toggle(self.state, player_x, &self.entities, capture_radius);
        self.state
    }

    /// Moves the ridden mount onto the player; idle mounts stay where they were
    /// left.
    pub fn sync_ridden(&mut self, player: &PlayerState) {
        if !self.state.is_mounted() {
            return;
        }
        let ridden = self.state;
        if let Some(entity) = self.entities.iter_mut().find(|entity| entity.kind == ridden) {
            entity.position = player.position;
        }
    }

    pub fn speed_multiplier(&self, config: &WorldConfig) -> f32 {
        if self.state.is_mounted() {
            config.mount_speed_multiplier
        } else {
            1.0
        }
    }
}
