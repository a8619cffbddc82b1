#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Jump,
    ToggleMount,
    ToggleDebug,
}

const ACTION_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }
}

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveLeft => 0,
            InputAction::MoveRight => 1,
            InputAction::Jump => 2,
            InputAction::ToggleMount => 3,
            InputAction::ToggleDebug => 4,
        }
    }

    /// Edge actions fire once per press; the rest are sampled as held state.
    pub const fn is_edge(self) -> bool {
        matches!(self, InputAction::ToggleMount | InputAction::ToggleDebug)
    }
}

/// One logical input sample, read once per tick.
///
/// Held actions report whether the key is down right now. Edge actions report
/// whether a new press happened since the previous sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    actions: ActionStates,
}

impl InputState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_actions(actions: ActionStates) -> Self {
        Self { actions }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn toggle_mount_pressed(&self) -> bool {
        self.is_down(InputAction::ToggleMount)
    }

    pub fn toggle_debug_pressed(&self) -> bool {
        self.is_down(InputAction::ToggleDebug)
    }

    /// +1 for right, -1 for left, 0 for neither. Right wins when both are held.
    pub fn horizontal_direction(&self) -> f32 {
        if self.is_down(InputAction::MoveRight) {
            1.0
        } else if self.is_down(InputAction::MoveLeft) {
            -1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_and_clears_actions() {
        let input = InputState::empty()
            .with_action_down(InputAction::Jump, true)
            .with_action_down(InputAction::MoveLeft, true)
            .with_action_down(InputAction::MoveLeft, false);

        assert!(input.is_down(InputAction::Jump));
        assert!(!input.is_down(InputAction::MoveLeft));
    }

    #[test]
    fn right_takes_priority_over_left() {
        let both = InputState::empty()
            .with_action_down(InputAction::MoveLeft, true)
            .with_action_down(InputAction::MoveRight, true);
        let left = InputState::empty().with_action_down(InputAction::MoveLeft, true);

        assert_eq!(both.horizontal_direction(), 1.0);
        assert_eq!(left.horizontal_direction(), -1.0);
        assert_eq!(InputState::empty().horizontal_direction(), 0.0);
    }

    #[test]
    fn only_toggles_are_edge_actions() {
        assert!(InputAction::ToggleMount.is_edge());
        assert!(InputAction::ToggleDebug.is_edge());
        assert!(!InputAction::Jump.is_edge());
        assert!(!InputAction::MoveRight.is_edge());
    }
}
