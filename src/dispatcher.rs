//! Multi-car dispatch: hall calls go to the car with the lowest estimated cost.

use log::{debug, info};

use crate::car::Car;
use crate::config::BuildingConfig;
use crate::stop_set::{FlagStopSet, StopSet};
use crate::types::outcome::{CarId, StepOutcome};
use crate::types::request::{Direction, Floor, Request};
use crate::types::state::CarState;

/// Weight of each pending stop in the cost, nudging near-ties toward
/// less busy cars.
const LOAD_PENALTY: f64 = 0.5;

/// Owns every car of a building. Car `i` in [`cars`](Self::cars) has id `i + 1`.
#[derive(Debug, Clone)]
pub struct Dispatcher<S: StopSet = FlagStopSet> {
    cars: Vec<Car<S>>,
    min_floor: Floor,
    max_floor: Floor,
}

impl<S: StopSet> Dispatcher<S> {
    /// Creates `car_count` idle cars, all at `min_floor`.
    pub fn new(car_count: usize, min_floor: Floor, max_floor: Floor) -> anyhow::Result<Self> {
        let cars = (1..=car_count)
            .map(|n| Car::new(CarId(n), min_floor, max_floor))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Dispatcher {
            cars,
            min_floor,
            max_floor,
        })
    }

    /// Builds the building described by `config`.
    ///
    /// Fails if `config` is invalid or names a different stop set than `S`.
    pub fn from_config(config: &BuildingConfig) -> anyhow::Result<Self> {
        config.validate()?;
        anyhow::ensure!(
            config.stop_set == S::KIND,
            "config asks for {:?} stop sets, dispatcher uses {:?}",
            config.stop_set,
            S::KIND
        );
        Self::new(config.cars, config.min_floor, config.max_floor)
    }

    pub fn cars(&self) -> &[Car<S>] {
        &self.cars
    }

    /// Car at position `index`.
    pub fn car(&self, index: usize) -> Option<&Car<S>> {
        self.cars.get(index)
    }

    pub fn car_mut(&mut self, index: usize) -> Option<&mut Car<S>> {
        self.cars.get_mut(index)
    }

    pub fn min_floor(&self) -> Floor {
        self.min_floor
    }

    pub fn max_floor(&self) -> Floor {
        self.max_floor
    }

    /// Hands `request` to the cheapest car and returns it.
    ///
    /// Ties go to the car that comes first. `None` only when there are no cars.
    pub fn dispatch(&mut self, request: Request) -> Option<&Car<S>> {
        let mut best: Option<(usize, f64)> = None;
        for (index, car) in self.cars.iter().enumerate() {
            let cost = self.cost(car, &request);
            debug!("{request}: car {} costs {cost:.1}", car.id());
            if best.is_none_or(|(_, lowest)| cost < lowest) {
                best = Some((index, cost));
            }
        }

        let (index, cost) = best?;
        let car = &mut self.cars[index];
        car.add_request(request);
        info!("{request} -> car {} (cost {cost:.1})", car.id());
        Some(&self.cars[index])
    }

    /// Estimated effort for `car` to serve `request`.
    ///
    /// * idle car: distance
    /// * request ahead, same direction (or a cab call): distance
    /// * request ahead, opposite direction: distance plus half the shaft,
    ///   since the car passes the floor and has to come back for it
    /// * request behind: run to the end of the shaft and back to the floor
    ///
    /// Every case adds [`LOAD_PENALTY`] per pending stop.
    pub fn cost(&self, car: &Car<S>, request: &Request) -> f64 {
        // widened so requests for any i32 floor cannot overflow
        let here = i64::from(car.current_floor());
        let target = i64::from(request.floor());
        let min = i64::from(self.min_floor);
        let max = i64::from(self.max_floor);
        let load = LOAD_PENALTY * car.pending_count() as f64;
        let distance = (here - target).abs() as f64;

        if car.state() == CarState::Idle || car.direction() == Direction::Idle {
            return distance + load;
        }

        let ahead = match car.direction() {
            Direction::Up => target >= here,
            Direction::Down => target <= here,
            Direction::Idle => true,
        };

        if ahead {
            if request.is_cab_call() || request.direction() == car.direction() {
                return distance + load;
            }
            let span = (max - min) as f64;
            return distance + span / 2.0 + load;
        }

        let detour = match car.direction() {
            Direction::Down => (here - min) + (target - min),
            _ => (max - here) + (max - target),
        };
        detour as f64 + load
    }

    /// Advances every car by one step, in index order.
    pub fn step_all(&mut self) -> Vec<StepOutcome> {
        self.cars.iter_mut().map(Car::step).collect()
    }

    /// True once every car is idle with nothing pending.
    pub fn all_idle(&self) -> bool {
        self.cars.iter().all(Car::is_at_rest)
    }

    /// One line per car.
    pub fn status(&self) -> String {
        self.cars.iter().map(|car| format!("  {car}\n")).collect()
    }
}
