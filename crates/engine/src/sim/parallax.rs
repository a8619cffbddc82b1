use crate::config::ParallaxMode;

use super::input::InputState;

#[derive(Debug, Clone, PartialEq)]
pub enum ParallaxOutput {
    /// Horizontal background offset per layer, nearest-last.
    Offsets(Vec<f32>),
    /// Scroll speed scalar and the resulting loop duration per layer, seconds.
    Durations { speed: f32, durations: Vec<f32> },
}

pub fn layer_offset(camera_x: f32, layer_index: usize, layer_factor: f32) -> f32 {
    -camera_x * (layer_index as f32 + 1.0) * layer_factor
}

pub fn layer_duration(base_duration: f32, speed: f32) -> f32 {
    base_duration / speed
}

/// Holds the input-driven speed scalar used by [`ParallaxMode::Speed`]. In
/// position mode it carries no state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxScheduler {
    speed: f32,
}

impl ParallaxScheduler {
    pub fn new(mode: &ParallaxMode) -> Self {
        let speed = match mode {
            ParallaxMode::Position { .. } => 1.0,
            ParallaxMode::Speed { initial_speed, .. } => *initial_speed,
        };
        Self { speed }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Nudges the speed scalar by one step in the held direction.
    pub fn update(&mut self, mode: &ParallaxMode, input: &InputState) {
        let ParallaxMode::Speed {
            min_speed,
            max_speed,
            speed_step,
            ..
        } = mode
        else {
            return;
        };
        let next = self.speed + input.horizontal_direction() * speed_step;
        self.speed = next.max(*min_speed).min(*max_speed);
    }

    pub fn output(&self, mode: &ParallaxMode, camera_x: f32) -> ParallaxOutput {
        match mode {
            ParallaxMode::Position {
                layer_count,
                layer_factor,
            } => ParallaxOutput::Offsets(
                (0..*layer_count)
                    .map(|index| layer_offset(camera_x, index, *layer_factor))
                    .collect(),
            ),
            ParallaxMode::Speed { base_durations, .. } => ParallaxOutput::Durations {
                speed: self.speed,
                durations: base_durations
                    .iter()
                    .map(|base| layer_duration(*base, self.speed))
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::InputAction;

    fn speed_mode() -> ParallaxMode {
        ParallaxMode::Speed {
            base_durations: vec![60.0, 30.0],
            min_speed: 0.5,
            max_speed: 2.0,
            speed_step: 0.25,
            initial_speed: 1.0,
        }
    }

    #[test]
    fn position_offsets_scale_with_layer_depth() {
        let mode = ParallaxMode::Position {
            layer_count: 3,
            layer_factor: 0.2,
        };
        let scheduler = ParallaxScheduler::new(&mode);
        let ParallaxOutput::Offsets(offsets) = scheduler.output(&mode, 1000.0) else {
            panic!("position mode yields offsets");
        };
        assert_eq!(offsets.len(), 3);
        assert!((offsets[0] + 200.0).abs() < 1e-3);
        assert!((offsets[1] + 400.0).abs() < 1e-3);
        assert!((offsets[2] + 600.0).abs() < 1e-3);
    }

    #[test]
    fn position_offsets_are_zero_at_world_start() {
        let mode = ParallaxMode::Position {
            layer_count: 2,
            layer_factor: 0.2,
        };
        let output = ParallaxScheduler::new(&mode).output(&mode, 0.0);
        assert_eq!(output, ParallaxOutput::Offsets(vec![-0.0, -0.0]));
    }

    #[test]
    fn position_mode_ignores_input() {
        let mode = ParallaxMode::Position {
            layer_count: 1,
            layer_factor: 0.2,
        };
        let mut scheduler = ParallaxScheduler::new(&mode);
        let right = InputState::empty().with_action_down(InputAction::MoveRight, true);
        scheduler.update(&mode, &right);
        assert_eq!(scheduler.speed(), 1.0);
    }

    #[test]
    fn held_direction_steps_speed_within_bounds() {
        let mode = speed_mode();
        let mut scheduler = ParallaxScheduler::new(&mode);
        let right = InputState::empty().with_action_down(InputAction::MoveRight, true);
        let left = InputState::empty().with_action_down(InputAction::MoveLeft, true);

        scheduler.update(&mode, &right);
        assert_eq!(scheduler.speed(), 1.25);
        for _ in 0..20 {
            scheduler.update(&mode, &right);
        }
        assert_eq!(scheduler.speed(), 2.0);
        for _ in 0..20 {
            scheduler.update(&mode, &left);
        }
        assert_eq!(scheduler.speed(), 0.5);

        scheduler.update(&mode, &InputState::empty());
        assert_eq!(scheduler.speed(), 0.5);
    }

    #[test]
    fn durations_shrink_as_speed_grows() {
        let mode = speed_mode();
        let mut scheduler = ParallaxScheduler::new(&mode);
        assert_eq!(
            scheduler.output(&mode, 500.0),
            ParallaxOutput::Durations {
                speed: 1.0,
                durations: vec![60.0, 30.0],
            }
        );

        let right = InputState::empty().with_action_down(InputAction::MoveRight, true);
        for _ in 0..4 {
            scheduler.update(&mode, &right);
        }
        assert_eq!(
            scheduler.output(&mode, 500.0),
            ParallaxOutput::Durations {
                speed: 2.0,
                durations: vec![30.0, 15.0],
            }
        );
    }
}
