use std::fmt;
use std::fmt::Display;

use crate::types::request::Direction;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarState {
    #[default]
    Idle,
    MovingUp,
    MovingDown,
    DoorOpen,
}

impl CarState {
    /// The moving state for `direction`, or `Idle` when there is none.
    pub fn moving(direction: Direction) -> CarState {
        match direction {
            Direction::Up => CarState::MovingUp,
            Direction::Down => CarState::MovingDown,
            Direction::Idle => CarState::Idle,
        }
    }

    pub fn is_moving(self) -> bool {
        matches!(self, CarState::MovingUp | CarState::MovingDown)
    }
}

impl Display for CarState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarState::Idle => write!(f, "Idle"),
            CarState::MovingUp => write!(f, "MovingUp"),
            CarState::MovingDown => write!(f, "MovingDown"),
            CarState::DoorOpen => write!(f, "DoorOpen"),
        }
    }
}
