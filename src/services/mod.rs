//! tower adapters that put the dispatcher behind a request pipeline:
//! raw button token -> [`ParseService`] -> [`FloorRange`] filter -> [`DispatchService`].

mod dispatch;
mod parse;
mod validate;

pub use dispatch::DispatchService;
pub use parse::{ParseLayer, ParseService};
pub use validate::FloorRange;
