use std::fmt;
use std::fmt::Display;

use crate::types::request::{Direction, Floor};

/// Car number, 1-based within a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CarId(pub usize);

impl Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// What a single [`Car::step`](crate::Car::step) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing pending, the car stays where it is.
    Idle,
    /// Direction picked while standing, movement starts next step.
    Departing(Direction),
    /// Passed a floor without stopping.
    Moved,
    /// Arrived at a requested floor and started opening the door.
    Stopped,
    /// Opened the door for a stop at the floor the car was already on.
    Opened,
    DoorOpen { closing_in: u32 },
    /// Door closed; carries the direction chosen for the next sweep.
    DoorClosed(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub car: CarId,
    /// Floor of the car after the step.
    pub floor: Floor,
    pub action: Action,
}

impl StepOutcome {
    /// The floor served during this step, if any: arrived at, or opened
    /// the door at without moving.
    pub fn stop_floor(&self) -> Option<Floor> {
        matches!(self.action, Action::Stopped | Action::Opened).then_some(self.floor)
    }
}

impl Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let StepOutcome { car, floor, action } = self;
        match action {
            Action::Idle => write!(f, "{car}: idle at floor {floor}"),
            Action::Departing(dir) => {
                write!(f, "{car}: idle at floor {floor}, starting {dir}")
            }
            Action::Moved => write!(f, "{car}: moved to floor {floor}"),
            Action::Stopped => {
                write!(f, "{car}: moved to floor {floor} [STOP, door opening]")
            }
            Action::Opened => write!(f, "{car}: door opening at floor {floor}"),
            Action::DoorOpen { closing_in } => {
                write!(f, "{car}: door open at floor {floor} (closing in {closing_in})")
            }
            Action::DoorClosed(dir) => {
                write!(f, "{car}: door closed at floor {floor}, direction={dir}")
            }
        }
    }
}
