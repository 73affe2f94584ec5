//! Pending-stop bookkeeping for one travel direction of a car.
//!
//! A [`Car`](crate::Car) keeps two stop sets, one for stops to make while
//! travelling up and one for stops while travelling down. The three variants
//! below answer the same questions with different representations:
//!
//! | Variant            | mark/clear/test | above/below        | count      | floors    |
//! |--------------------|-----------------|--------------------|------------|-----------|
//! | [`FlagStopSet`]    | O(1)            | O(1) cached bounds | O(n)       | unbounded |
//! | [`BitmaskStopSet`] | O(1)            | O(1) masked word   | O(1)       | 64        |
//! | [`BitVecStopSet`]  | O(1)            | next set bit       | O(n / 64)  | unbounded |
//!
//! They must be interchangeable: the same calls in the same order give the
//! same answers, so cars built on any of them visit floors in the same order.

mod bitmask;
mod bitvec;
mod flags;

pub use bitmask::{BITMASK_MAX_FLOORS, BitmaskStopSet};
pub use bitvec::BitVecStopSet;
pub use flags::FlagStopSet;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::types::request::Floor;

pub trait StopSet: Debug {
    /// Configuration name of this variant.
    const KIND: StopSetKind;

    /// Creates an empty set able to hold floors `min_floor..=max_floor`.
    ///
    /// Fails if the range is empty or wider than the representation allows.
    fn with_bounds(min_floor: Floor, max_floor: Floor) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Marks `floor`. Floors outside the bounds are ignored.
    fn mark(&mut self, floor: Floor);

    fn clear(&mut self, floor: Floor);

    fn test(&self, floor: Floor) -> bool;

    /// Whether any marked floor lies strictly above `floor`.
    fn has_above(&self, floor: Floor) -> bool;

    /// Whether any marked floor lies strictly below `floor`.
    fn has_below(&self, floor: Floor) -> bool;

    fn any(&self) -> bool;

    fn count(&self) -> usize;

    /// Marked floors in ascending order.
    fn snapshot(&self) -> Vec<Floor>;
}

/// Selects a [`StopSet`] variant at configuration time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopSetKind {
    #[default]
    Flags,
    Bitmask,
    BitVec,
}

/// Number of floors in `min_floor..=max_floor`, or an error if the range is empty.
pub(crate) fn floor_span(min_floor: Floor, max_floor: Floor) -> anyhow::Result<usize> {
    anyhow::ensure!(
        min_floor <= max_floor,
        "invalid floor range: min floor {min_floor} is above max floor {max_floor}"
    );
    Ok((i64::from(max_floor) - i64::from(min_floor) + 1) as usize)
}

/// Offset of `floor` from `base`, without overflow for any pair of floors.
pub(crate) fn offset(base: Floor, floor: Floor) -> i64 {
    i64::from(floor) - i64::from(base)
}
