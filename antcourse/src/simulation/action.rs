use shared::ACTION_COUNT;

use super::ant::Ant;
use super::{MIN_SPEED, SPEED_STEP, TURN_STEP};

/// The discrete steering choices a controller can make each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    SlowDown,
    SpeedUp,
}

impl Action {
    /// Index of each action in the controller output.
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::TurnLeft,
        Action::TurnRight,
        Action::SlowDown,
        Action::SpeedUp,
    ];

    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Argmax over the first `ACTION_COUNT` outputs, ties going to the lowest
    /// index. NaN never wins. Returns `None` if the output is too short.
    pub fn select(output: &[f32]) -> Option<Action> {
        let output = output.get(..ACTION_COUNT)?;
        let mut best: Option<(usize, f32)> = None;
        for (index, &value) in output.iter().enumerate() {
            if value.is_nan() {
                continue;
            }
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((index, value)),
            }
        }
        let (index, _) = best.unwrap_or((0, 0.0));
        Self::from_index(index)
    }

    /// One-hot controller output selecting this action.
    pub fn one_hot(self) -> Vec<f32> {
        let mut output = vec![0.0; ACTION_COUNT];
        output[self.index()] = 1.0;
        output
    }

    pub(crate) fn apply(self, ant: &mut Ant) {
        match self {
            Action::TurnLeft => ant.angle += TURN_STEP,
            Action::TurnRight => ant.angle -= TURN_STEP,
            Action::SlowDown => {
                if ant.speed - SPEED_STEP >= MIN_SPEED {
                    ant.speed -= SPEED_STEP;
                }
            }
            Action::SpeedUp => ant.speed += SPEED_STEP,
        }
    }
}
