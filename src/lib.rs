//! Elevator cars scheduled with the LOOK policy and a cost-based dispatcher
//! for buildings with several cars.
//!
//! The simulation is tick driven: nothing moves until the caller invokes
//! [`Car::step`] or [`Dispatcher::step_all`].

pub mod car;
pub mod config;
pub mod dispatcher;
pub mod services;
pub mod stop_set;
pub mod types;

pub use car::{Car, DOOR_OPEN_TICKS, StopsSnapshot};
pub use config::BuildingConfig;
pub use dispatcher::Dispatcher;
pub use stop_set::{BITMASK_MAX_FLOORS, BitVecStopSet, BitmaskStopSet, FlagStopSet, StopSet, StopSetKind};
pub use types::outcome::{Action, CarId, StepOutcome};
pub use types::request::{Direction, Floor, Request, RequestKind};
pub use types::state::CarState;
