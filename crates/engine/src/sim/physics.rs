use crate::config::WorldConfig;

use super::input::{InputAction, InputState};
use super::state::{clamp_to_span, PlayerState};

pub fn horizontal_speed(config: &WorldConfig, speed_multiplier: f32, debug: bool) -> f32 {
    let debug_multiplier = if debug {
        config.debug_speed_multiplier
    } else {
        1.0
    };
    config.base_speed * debug_multiplier * speed_multiplier
}

/// Advances the player by one tick.
///
/// Horizontal velocity is replaced from input every tick. A jump only starts
/// from the ground; gravity then applies before integration, so a `dt` of 0
/// still sets the jump velocity without moving the player. The ground is a
/// one-sided floor at `ground_y`.
pub fn step(
    player: PlayerState,
    input: &InputState,
    dt: f32,
    speed_multiplier: f32,
    debug: bool,
    config: &WorldConfig,
) -> PlayerState {
    let dt = dt.max(0.0);
    let mut next = player;

    let speed = horizontal_speed(config, speed_multiplier, debug);
    next.velocity.x = input.horizontal_direction() * speed;

    if input.is_down(InputAction::Jump) && next.on_ground {
        next.velocity.y = -config.jump_impulse;
        next.on_ground = false;
    }

    if !next.on_ground {
        next.velocity.y += config.gravity * dt;
    }

    next.position.x += next.velocity.x * dt;
    next.position.y += next.velocity.y * dt;

    if next.position.y > config.ground_y {
        next.position.y = config.ground_y;
        next.velocity.y = 0.0;
        next.on_ground = true;
    }

    next.position.x = clamp_to_span(next.position.x, config.world_width, config.player_width);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigPreset;
    use crate::sim::MountKind;

    fn config() -> WorldConfig {
        WorldConfig {
            gravity: 1800.0,
            jump_impulse: 900.0,
            base_speed: 300.0,
            ..ConfigPreset::Stable.world_config()
        }
    }

    fn held(actions: &[InputAction]) -> InputState {
        actions
            .iter()
            .fold(InputState::empty(), |input, action| {
                input.with_action_down(*action, true)
            })
    }

    #[test]
    fn horizontal_velocity_is_set_not_accumulated() {
        let config = config();
        let right = held(&[InputAction::MoveRight]);
        let player = PlayerState::grounded(500.0, config.ground_y);

        let once = step(player, &right, 0.1, 1.0, false, &config);
        let twice = step(once, &right, 0.1, 1.0, false, &config);
        assert_eq!(once.velocity.x, 300.0);
        assert_eq!(twice.velocity.x, 300.0);
        assert!((twice.position.x - 560.0).abs() < 1e-3);

        let released = step(twice, &InputState::empty(), 0.1, 1.0, false, &config);
        assert_eq!(released.velocity.x, 0.0);
        assert_eq!(released.position.x, twice.position.x);
    }

    #[test]
    fn left_and_right_together_move_right() {
        let config = config();
        let both = held(&[InputAction::MoveLeft, InputAction::MoveRight]);
        let player = step(
            PlayerState::grounded(500.0, config.ground_y),
            &both,
            0.5,
            1.0,
            false,
            &config,
        );
        assert_eq!(player.velocity.x, 300.0);
        assert!(player.position.x > 500.0);
    }

    #[test]
    fn speed_combines_debug_and_mount_multipliers() {
        let config = config();
        assert_eq!(horizontal_speed(&config, 1.0, false), 300.0);
        assert_eq!(horizontal_speed(&config, 2.0, false), 600.0);
        assert_eq!(horizontal_speed(&config, 2.0, true), 1800.0);

        let left = held(&[InputAction::MoveLeft]);
        let player = step(
            PlayerState::grounded(2000.0, config.ground_y),
            &left,
            0.1,
            2.0,
            false,
            &config,
        );
        assert_eq!(player.velocity.x, -600.0);
    }

    #[test]
    fn jump_with_zero_dt_applies_impulse_without_moving() {
        let config = config();
        let jump = held(&[InputAction::Jump]);
        let start = PlayerState::grounded(300.0, config.ground_y);

        let airborne = step(start, &jump, 0.0, 1.0, false, &config);
        assert_eq!(airborne.velocity.y, -900.0);
        assert!(!airborne.on_ground);
        assert_eq!(airborne.position, start.position);
    }

    #[test]
    fn jump_arc_returns_to_ground_at_rest() {
        let config = config();
        let jump = held(&[InputAction::Jump]);
        let mut player = step(
            PlayerState::grounded(300.0, config.ground_y),
            &jump,
            0.0,
            1.0,
            false,
            &config,
        );
        assert_eq!(player.velocity.y, -900.0);

        let mut min_y = player.position.y;
        let mut ticks = 0;
        while !player.on_ground {
            player = step(player, &jump, 1.0 / 60.0, 1.0, false, &config);
            min_y = min_y.min(player.position.y);
            ticks += 1;
            assert!(ticks < 600, "player never landed");
        }

        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.position.y, config.ground_y);
        // Peak height is roughly v^2 / 2g = 225.
        assert!(config.ground_y - min_y > 200.0);
        // Holding jump through the arc does not retrigger mid-air; it only
        // relaunches after landing.
        let relaunched = step(player, &jump, 0.0, 1.0, false, &config);
        assert!(!relaunched.on_ground);
    }

    #[test]
    fn negative_dt_is_treated_as_zero() {
        let config = config();
        let right = held(&[InputAction::MoveRight]);
        let mut falling = PlayerState::grounded(400.0, config.ground_y);
        falling.on_ground = false;
        falling.position.y = 500.0;
        falling.velocity.y = 10.0;

        let next = step(falling, &right, -0.5, 1.0, false, &config);
        assert_eq!(next.position, falling.position);
        assert_eq!(next.velocity.y, 10.0);
    }

    #[test]
    fn ground_collision_snaps_and_zeroes_vertical_velocity() {
        let config = config();
        let mut player = PlayerState::grounded(400.0, config.ground_y);
        player.on_ground = false;
        player.position.y = config.ground_y - 1.0;
        player.velocity.y = 500.0;

        let landed = step(player, &InputState::empty(), 0.1, 1.0, false, &config);
        assert!(landed.on_ground);
        assert_eq!(landed.position.y, config.ground_y);
        assert_eq!(landed.velocity.y, 0.0);
    }

    #[test]
    fn world_edges_clamp_position() {
        let config = config();
        let left = held(&[InputAction::MoveLeft]);
        let right = held(&[InputAction::MoveRight]);

        let at_left = step(
            PlayerState::grounded(5.0, config.ground_y),
            &left,
            1.0,
            1.0,
            false,
            &config,
        );
        assert_eq!(at_left.position.x, 0.0);

        let at_right = step(
            PlayerState::grounded(config.world_width - config.player_width - 5.0, config.ground_y),
            &right,
            1.0,
            2.0,
            true,
            &config,
        );
        assert_eq!(
            at_right.position.x,
            config.world_width - config.player_width
        );
    }

    #[test]
    fn mount_field_passes_through() {
        let config = config();
        let mut player = PlayerState::grounded(400.0, config.ground_y);
        player.mount = MountKind::Horse;
        let next = step(player, &InputState::empty(), 0.016, 2.0, false, &config);
        assert_eq!(next.mount, MountKind::Horse);
    }

    #[test]
    fn fixed_step_units_match_tick_based_movement() {
        let config = ConfigPreset::Classic.world_config();
        let right = held(&[InputAction::MoveRight]);
        let player = step(
            PlayerState::grounded(100.0, config.ground_y),
            &right,
            1.0,
            1.0,
            false,
            &config,
        );
        assert_eq!(player.position.x, 105.0);
    }
}
