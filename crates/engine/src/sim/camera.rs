use crate::config::{CameraPolicy, WorldConfig};

use super::state::{clamp_to_span, CameraState};

/// Computes this tick's camera from the previous one.
pub fn follow(
    policy: CameraPolicy,
    camera: CameraState,
    player_x: f32,
    dt: f32,
    config: &WorldConfig,
) -> CameraState {
    let viewport = config.viewport_width;
    let x = match policy {
        CameraPolicy::DeadZone { width } => {
            if player_x > camera.x + viewport - width {
                player_x - viewport + width
            } else if player_x < camera.x + width {
                player_x - width
            } else {
                camera.x
            }
        }
        CameraPolicy::Smooth { factor } => {
            let target = smoothing_target(player_x, config);
            camera.x + (target - camera.x) * factor
        }
        CameraPolicy::SmoothScaled {
            factor,
            reference_hz,
        } => {
            let target = smoothing_target(player_x, config);
            camera.x + (target - camera.x) * scaled_blend(factor, reference_hz, dt)
        }
        CameraPolicy::CenterLock => player_x - viewport * 0.5,
    };

    CameraState {
        x: clamp_to_span(x, config.world_width, viewport),
    }
}

/// Camera x that centers the player's body in the viewport.
pub fn smoothing_target(player_x: f32, config: &WorldConfig) -> f32 {
    player_x - config.viewport_width * 0.5 + config.player_width * 0.5
}

/// Per-tick blend such that `reference_hz` ticks per second converge exactly as
/// fast as the unscaled policy does at that rate.
fn scaled_blend(factor: f32, reference_hz: f32, dt: f32) -> f32 {
    let elapsed_ticks = dt.max(0.0) * reference_hz;
    1.0 - (1.0 - factor).powf(elapsed_ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WorldConfig {
        WorldConfig {
            world_width: 5000.0,
            viewport_width: 1920.0,
            player_width: 100.0,
            ..WorldConfig::default()
        }
    }

    const DEAD_ZONE: CameraPolicy = CameraPolicy::DeadZone { width: 600.0 };

    #[test]
    fn dead_zone_holds_camera_inside_band() {
        let config = config();
        let camera = CameraState { x: 1000.0 };
        for player_x in [1600.0, 2000.0, 2320.0] {
            assert_eq!(follow(DEAD_ZONE, camera, player_x, 0.016, &config), camera);
        }
    }

    #[test]
    fn dead_zone_pushes_at_right_edge() {
        let config = config();
        let camera = CameraState { x: 1000.0 };
        let next = follow(DEAD_ZONE, camera, 2400.0, 0.016, &config);
        assert_eq!(next.x, 2400.0 - 1920.0 + 600.0);
    }

    #[test]
    fn dead_zone_pushes_at_left_edge() {
        let config = config();
        let camera = CameraState { x: 1000.0 };
        let next = follow(DEAD_ZONE, camera, 1500.0, 0.016, &config);
        assert_eq!(next.x, 900.0);
    }

    #[test]
    fn widest_dead_zone_settles_for_a_still_player() {
        let config = config();
        let widest = CameraPolicy::DeadZone {
            width: config.viewport_width * 0.5,
        };
        assert_eq!(
            WorldConfig {
                camera: widest,
                ..config.clone()
            }
            .validate(),
            Ok(())
        );

        let mut camera = follow(widest, CameraState::default(), 2500.0, 1.0 / 60.0, &config);
        assert_eq!(camera.x, 1540.0);
        for _ in 0..6 {
            let next = follow(widest, camera, 2500.0, 1.0 / 60.0, &config);
            assert_eq!(next, camera);
            camera = next;
        }
    }

    #[test]
    fn dead_zone_result_is_clamped_to_world() {
        let config = config();
        let near_start = follow(DEAD_ZONE, CameraState { x: 100.0 }, 50.0, 0.016, &config);
        assert_eq!(near_start.x, 0.0);

        let near_end = follow(DEAD_ZONE, CameraState { x: 3000.0 }, 4900.0, 0.016, &config);
        assert_eq!(near_end.x, 5000.0 - 1920.0);
    }

    #[test]
    fn smoothing_converges_geometrically() {
        let config = config();
        let policy = CameraPolicy::Smooth { factor: 0.05 };
        let player_x = 2500.0;
        let target = smoothing_target(player_x, &config);
        assert_eq!(target, 1590.0);

        let mut camera = CameraState { x: 0.0 };
        for n in 1..=40 {
            camera = follow(policy, camera, player_x, 0.016, &config);
            let expected = target.abs() * 0.95f32.powi(n);
            let actual = (target - camera.x).abs();
            assert!(
                (actual - expected).abs() < 0.05,
                "tick {n}: expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn smoothing_ignores_dt() {
        let config = config();
        let policy = CameraPolicy::Smooth { factor: 0.05 };
        let camera = CameraState { x: 0.0 };
        let slow = follow(policy, camera, 2500.0, 0.1, &config);
        let fast = follow(policy, camera, 2500.0, 0.001, &config);
        assert_eq!(slow, fast);
    }

    #[test]
    fn scaled_smoothing_matches_unscaled_at_reference_rate() {
        let config = config();
        let camera = CameraState { x: 0.0 };
        let unscaled = follow(CameraPolicy::Smooth { factor: 0.05 }, camera, 2500.0, 0.0, &config);
        let scaled = follow(
            CameraPolicy::SmoothScaled {
                factor: 0.05,
                reference_hz: 60.0,
            },
            camera,
            2500.0,
            1.0 / 60.0,
            &config,
        );
        assert!((unscaled.x - scaled.x).abs() < 1e-3);
    }

    #[test]
    fn scaled_smoothing_is_rate_independent() {
        let config = config();
        let policy = CameraPolicy::SmoothScaled {
            factor: 0.05,
            reference_hz: 60.0,
        };
        let mut at_30 = CameraState { x: 0.0 };
        for _ in 0..30 {
            at_30 = follow(policy, at_30, 2500.0, 1.0 / 30.0, &config);
        }
        let mut at_120 = CameraState { x: 0.0 };
        for _ in 0..120 {
            at_120 = follow(policy, at_120, 2500.0, 1.0 / 120.0, &config);
        }
        assert!((at_30.x - at_120.x).abs() < 0.5);
    }

    #[test]
    fn scaled_smoothing_holds_still_at_zero_dt() {
        let config = config();
        let policy = CameraPolicy::SmoothScaled {
            factor: 0.05,
            reference_hz: 60.0,
        };
        let camera = CameraState { x: 300.0 };
        assert_eq!(follow(policy, camera, 2500.0, 0.0, &config), camera);
    }

    #[test]
    fn center_lock_tracks_player_and_clamps() {
        let config = config();
        let policy = CameraPolicy::CenterLock;
        let camera = CameraState::default();
        assert_eq!(follow(policy, camera, 2000.0, 1.0, &config).x, 1040.0);
        assert_eq!(follow(policy, camera, 100.0, 1.0, &config).x, 0.0);
        assert_eq!(follow(policy, camera, 4900.0, 1.0, &config).x, 3080.0);
    }
}
