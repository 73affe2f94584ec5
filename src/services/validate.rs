use log::warn;
use tower::BoxError;
use tower::filter::Predicate;

use crate::config::BuildingConfig;
use crate::types::request::{Floor, Request};

/// Rejects requests for floors the building does not have, before they
/// reach the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct FloorRange {
    min_floor: Floor,
    max_floor: Floor,
}

impl FloorRange {
    pub fn new(min_floor: Floor, max_floor: Floor) -> Self {
        FloorRange {
            min_floor,
            max_floor,
        }
    }

    pub fn from_config(config: &BuildingConfig) -> Self {
        Self::new(config.min_floor, config.max_floor)
    }
}

impl Predicate<Request> for FloorRange {
    type Request = Request;

    fn check(&mut self, request: Request) -> Result<Self::Request, BoxError> {
        if !(self.min_floor..=self.max_floor).contains(&request.floor()) {
            warn!(
                "rejecting {request}: floors are {}..={}",
                self.min_floor, self.max_floor
            );
            return Err(BoxError::from(format!(
                "floor {} outside {}..={}",
                request.floor(),
                self.min_floor,
                self.max_floor
            )));
        }
        Ok(request)
    }
}
