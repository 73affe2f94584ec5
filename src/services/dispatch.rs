use std::future::{Ready, ready};
use std::task::{Context, Poll};
use tower::Service;

use crate::dispatcher::Dispatcher;
use crate::stop_set::StopSet;
use crate::types::outcome::CarId;
use crate::types::request::Request;

/// Innermost service: assigns each request to a car and answers with its id.
pub struct DispatchService<'a, S: StopSet> {
    dispatcher: &'a mut Dispatcher<S>,
}

impl<'a, S: StopSet> DispatchService<'a, S> {
    pub fn new(dispatcher: &'a mut Dispatcher<S>) -> Self {
        DispatchService { dispatcher }
    }
}

impl<S: StopSet> Service<Request> for DispatchService<'_, S> {
    type Response = CarId;
    type Error = anyhow::Error;
    type Future = Ready<anyhow::Result<CarId>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let chosen = self
            .dispatcher
            .dispatch(request)
            .map(|car| car.id())
            .ok_or_else(|| anyhow::anyhow!("no car available for {request}"));
        ready(chosen)
    }
}
