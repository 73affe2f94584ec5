use crate::stop_set::{StopSet, StopSetKind, floor_span, offset};
use crate::types::request::Floor;

/// Widest floor range a [`BitmaskStopSet`] can hold.
pub const BITMASK_MAX_FLOORS: usize = u64::BITS as usize;

/// One bit per floor in a single `u64`; bit `i` is floor `min_floor + i`.
///
/// Every query is a handful of word operations, at the price of a hard
/// limit of [`BITMASK_MAX_FLOORS`] floors.
#[derive(Debug, Clone)]
pub struct BitmaskStopSet {
    base: Floor,
    span: usize,
    bits: u64,
}

/// Bits strictly above bit position `off`.
fn above_mask(off: i64) -> u64 {
    if off < 0 {
        !0
    } else if off >= 63 {
        0
    } else {
        !0u64 << (off + 1)
    }
}

/// Bits strictly below bit position `off`.
fn below_mask(off: i64) -> u64 {
    if off <= 0 {
        0
    } else if off >= 64 {
        !0
    } else {
        (1u64 << off) - 1
    }
}

impl BitmaskStopSet {
    fn bit(&self, floor: Floor) -> Option<u32> {
        let off = offset(self.base, floor);
        (0..self.span as i64).contains(&off).then_some(off as u32)
    }
}

impl StopSet for BitmaskStopSet {
    const KIND: StopSetKind = StopSetKind::Bitmask;

    fn with_bounds(min_floor: Floor, max_floor: Floor) -> anyhow::Result<Self> {
        let span = floor_span(min_floor, max_floor)?;
        if span > BITMASK_MAX_FLOORS {
            anyhow::bail!(
                "bitmask stop set supports at most {BITMASK_MAX_FLOORS} floors, \
                 {min_floor}..={max_floor} has {span}"
            );
        }
        Ok(BitmaskStopSet {
            base: min_floor,
            span,
            bits: 0,
        })
    }

    fn mark(&mut self, floor: Floor) {
        if let Some(bit) = self.bit(floor) {
            self.bits |= 1u64 << bit;
        }
    }

    fn clear(&mut self, floor: Floor) {
        if let Some(bit) = self.bit(floor) {
            self.bits &= !(1u64 << bit);
        }
    }

    fn test(&self, floor: Floor) -> bool {
        self.bit(floor)
            .is_some_and(|bit| self.bits & (1u64 << bit) != 0)
    }

    fn has_above(&self, floor: Floor) -> bool {
        self.bits & above_mask(offset(self.base, floor)) != 0
    }

    fn has_below(&self, floor: Floor) -> bool {
        self.bits & below_mask(offset(self.base, floor)) != 0
    }

    fn any(&self) -> bool {
        self.bits != 0
    }

    fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    fn snapshot(&self) -> Vec<Floor> {
        let mut floors = Vec::with_capacity(self.count());
        let mut rest = self.bits;
        while rest != 0 {
            floors.push(self.base + rest.trailing_zeros() as Floor);
            rest &= rest - 1;
        }
        floors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop_set::tests::{exercise, negative_floors};

    #[test]
    fn shared_behavior() {
        exercise::<BitmaskStopSet>();
        negative_floors::<BitmaskStopSet>();
    }

    #[test]
    fn masks() {
        assert_eq!(above_mask(2), !0b111);
        assert_eq!(below_mask(3), 0b111);
        assert_eq!(below_mask(0), 0);
        assert_eq!(above_mask(63), 0);
    }

    #[test]
    fn full_width_is_usable() {
        let mut set = BitmaskStopSet::with_bounds(1, 64).unwrap();
        set.mark(64);
        set.mark(1);
        assert!(set.has_above(63));
        assert!(!set.has_above(64));
        assert!(set.has_below(2));
        assert_eq!(set.count(), 2);
        assert_eq!(set.snapshot(), vec![1, 64]);
    }

    #[test]
    fn too_many_floors_is_a_configuration_error() {
        let err = BitmaskStopSet::with_bounds(1, 65).unwrap_err();
        assert!(err.to_string().contains("at most 64 floors"));
    }
}
