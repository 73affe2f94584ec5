//! A single elevator car driven by the LOOK policy.
//!
//! The car keeps sweeping in its current direction while any stop remains
//! further along, reverses at the farthest pending stop, and rests only once
//! nothing is pending anywhere in its shaft.

use log::{debug, trace};
use std::fmt;
use std::fmt::Display;

use crate::stop_set::{FlagStopSet, StopSet};
use crate::types::outcome::{Action, CarId, StepOutcome};
use crate::types::request::{Direction, Floor, Request, RequestKind};
use crate::types::state::CarState;

/// Steps the door stays open after a stop.
pub const DOOR_OPEN_TICKS: u32 = 2;

/// Floors pending in each direction, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopsSnapshot {
    pub up: Vec<Floor>,
    pub down: Vec<Floor>,
}

#[derive(Debug, Clone)]
pub struct Car<S: StopSet = FlagStopSet> {
    id: CarId,
    current_floor: Floor,
    state: CarState,
    direction: Direction,
    min_floor: Floor,
    max_floor: Floor,
    up_stops: S,
    down_stops: S,
    door_timer: u32,
}

impl<S: StopSet> Car<S> {
    /// Creates an idle car at `min_floor`.
    pub fn new(id: CarId, min_floor: Floor, max_floor: Floor) -> anyhow::Result<Self> {
        Ok(Car {
            id,
            current_floor: min_floor,
            state: CarState::Idle,
            direction: Direction::Idle,
            min_floor,
            max_floor,
            up_stops: S::with_bounds(min_floor, max_floor)?,
            down_stops: S::with_bounds(min_floor, max_floor)?,
            door_timer: 0,
        })
    }

    /// Repositions the car as if it were passing `floor` heading `direction`.
    ///
    /// Pending stops are kept. A door that was open is considered closed.
    pub fn place(&mut self, floor: Floor, direction: Direction) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.in_bounds(floor),
            "car {} cannot be placed at floor {floor} outside {}..={}",
            self.id,
            self.min_floor,
            self.max_floor
        );
        self.current_floor = floor;
        self.direction = direction;
        self.state = CarState::moving(direction);
        self.door_timer = 0;
        Ok(())
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn min_floor(&self) -> Floor {
        self.min_floor
    }

    pub fn max_floor(&self) -> Floor {
        self.max_floor
    }

    /// Remaining open-door steps, zero unless the door is open.
    pub fn door_timer(&self) -> u32 {
        self.door_timer
    }

    fn in_bounds(&self, floor: Floor) -> bool {
        (self.min_floor..=self.max_floor).contains(&floor)
    }

    /// Files a request into the stop sets.
    ///
    /// Out-of-range floors are ignored. A request for the floor an idle or
    /// door-open car stands at just (re)opens the door.
    pub fn add_request(&mut self, request: Request) {
        let floor = request.floor();
        if !self.in_bounds(floor) {
            debug!(
                "car {}: ignoring {request}, outside {}..={}",
                self.id, self.min_floor, self.max_floor
            );
            return;
        }

        if floor == self.current_floor
            && matches!(self.state, CarState::Idle | CarState::DoorOpen)
        {
            self.open_door(Direction::Idle);
            return;
        }

        match request.kind() {
            RequestKind::HallCall => {
                if request.direction() == Direction::Up {
                    self.up_stops.mark(floor);
                } else {
                    self.down_stops.mark(floor);
                }
            }
            RequestKind::CabCall => {
                if floor > self.current_floor {
                    self.up_stops.mark(floor);
                } else if floor < self.current_floor {
                    self.down_stops.mark(floor);
                } else if self.direction == Direction::Up {
                    // passing this floor; serve it on the way back
                    self.down_stops.mark(floor);
                } else {
                    self.up_stops.mark(floor);
                }
            }
        }

        if self.state == CarState::Idle {
            if floor > self.current_floor {
                self.direction = Direction::Up;
            } else if floor < self.current_floor {
                self.direction = Direction::Down;
            }
            self.state = CarState::moving(self.direction);
        }
    }

    /// Advances the car by exactly one state transition.
    pub fn step(&mut self) -> StepOutcome {
        let action = match self.state {
            CarState::DoorOpen => self.step_door(),
            CarState::MovingUp => self.step_move(Direction::Up),
            CarState::MovingDown => self.step_move(Direction::Down),
            CarState::Idle => self.settle(),
        };
        let outcome = StepOutcome {
            car: self.id,
            floor: self.current_floor,
            action,
        };
        trace!("{outcome}");
        outcome
    }

    fn step_door(&mut self) -> Action {
        self.door_timer = self.door_timer.saturating_sub(1);
        if self.door_timer > 0 {
            return Action::DoorOpen {
                closing_in: self.door_timer,
            };
        }
        self.state = CarState::Idle;
        self.select_direction();
        Action::DoorClosed(self.direction)
    }

    fn step_move(&mut self, heading: Direction) -> Action {
        if !self.has_stops_ahead(heading) {
            // nothing further along; never run past the last stop or the shaft end
            return self.settle();
        }
        self.current_floor += heading.delta();
        if self.should_stop(heading) {
            self.open_door(heading);
            Action::Stopped
        } else {
            Action::Moved
        }
    }

    /// Serves a stop at the current floor, or picks a direction without moving.
    fn settle(&mut self) -> Action {
        let here = self.current_floor;
        if self.up_stops.test(here) || self.down_stops.test(here) {
            self.open_door(Direction::Idle);
            return Action::Opened;
        }
        self.select_direction();
        match self.direction {
            Direction::Idle => Action::Idle,
            dir => Action::Departing(dir),
        }
    }

    fn should_stop(&self, heading: Direction) -> bool {
        let here = self.current_floor;
        let (ahead, behind) = self.sets_for(heading);
        ahead.test(here) || (!self.has_stops_ahead(heading) && behind.test(here))
    }

    /// Opens the door at the current floor and clears the stops it serves:
    /// those for `heading`, plus the opposite ones when the car is turning
    /// around here. `Direction::Idle` serves both.
    fn open_door(&mut self, heading: Direction) {
        let here = self.current_floor;
        self.state = CarState::DoorOpen;
        self.door_timer = DOOR_OPEN_TICKS;
        match heading {
            Direction::Up => {
                self.up_stops.clear(here);
                if !self.has_stops_above() {
                    self.down_stops.clear(here);
                }
            }
            Direction::Down => {
                self.down_stops.clear(here);
                if !self.has_stops_below() {
                    self.up_stops.clear(here);
                }
            }
            Direction::Idle => {
                self.up_stops.clear(here);
                self.down_stops.clear(here);
            }
        }
    }

    /// LOOK: keep going while stops remain ahead, else reverse if stops
    /// remain behind, else rest.
    fn select_direction(&mut self) {
        let above = self.has_stops_above();
        let below = self.has_stops_below();
        self.direction = match (self.direction, above, below) {
            (Direction::Up, true, _) => Direction::Up,
            (Direction::Up, false, true) => Direction::Down,
            (Direction::Down, _, true) => Direction::Down,
            (Direction::Down, true, false) => Direction::Up,
            (Direction::Idle, true, _) => Direction::Up,
            (Direction::Idle, false, true) => Direction::Down,
            _ => Direction::Idle,
        };
        self.state = CarState::moving(self.direction);
    }

    fn sets_for(&self, heading: Direction) -> (&S, &S) {
        match heading {
            Direction::Down => (&self.down_stops, &self.up_stops),
            _ => (&self.up_stops, &self.down_stops),
        }
    }

    fn has_stops_ahead(&self, heading: Direction) -> bool {
        match heading {
            Direction::Up => self.has_stops_above(),
            Direction::Down => self.has_stops_below(),
            Direction::Idle => false,
        }
    }

    pub(crate) fn has_stops_above(&self) -> bool {
        self.up_stops.has_above(self.current_floor) || self.down_stops.has_above(self.current_floor)
    }

    pub(crate) fn has_stops_below(&self) -> bool {
        self.up_stops.has_below(self.current_floor) || self.down_stops.has_below(self.current_floor)
    }

    pub fn has_pending_requests(&self) -> bool {
        self.up_stops.any() || self.down_stops.any()
    }

    pub fn pending_count(&self) -> usize {
        self.up_stops.count() + self.down_stops.count()
    }

    pub fn stops_snapshot(&self) -> StopsSnapshot {
        StopsSnapshot {
            up: self.up_stops.snapshot(),
            down: self.down_stops.snapshot(),
        }
    }

    /// Idle with nothing pending: stepping changes nothing.
    pub fn is_at_rest(&self) -> bool {
        self.state == CarState::Idle && !self.has_pending_requests()
    }

    /// One-line human-readable summary.
    pub fn status(&self) -> String {
        self.to_string()
    }
}

impl<S: StopSet> Display for Car<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] floor={} state={} dir={} pending={}",
            self.id,
            self.current_floor,
            self.state,
            self.direction,
            self.pending_count()
        )
    }
}
