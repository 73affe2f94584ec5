use crate::stop_set::{StopSet, StopSetKind, floor_span, offset};
use crate::types::request::Floor;

/// One flag per floor, plus the lowest and highest marked floor so that
/// above/below queries never scan.
///
/// The cached bounds are rebuilt with a full scan only when the floor being
/// cleared is one of them.
#[derive(Debug, Clone)]
pub struct FlagStopSet {
    base: Floor,
    flags: Vec<bool>,
    /// `(lowest, highest)` marked floor, `None` when nothing is marked.
    bounds: Option<(Floor, Floor)>,
}

impl FlagStopSet {
    fn index(&self, floor: Floor) -> Option<usize> {
        usize::try_from(offset(self.base, floor))
            .ok()
            .filter(|&i| i < self.flags.len())
    }

    fn floor_at(&self, index: usize) -> Floor {
        self.base + index as Floor
    }

    fn recompute_bounds(&mut self) {
        let lowest = self.flags.iter().position(|&f| f);
        let highest = self.flags.iter().rposition(|&f| f);
        self.bounds = lowest
            .zip(highest)
            .map(|(lo, hi)| (self.floor_at(lo), self.floor_at(hi)));
    }
}

impl StopSet for FlagStopSet {
    const KIND: StopSetKind = StopSetKind::Flags;

    fn with_bounds(min_floor: Floor, max_floor: Floor) -> anyhow::Result<Self> {
        let span = floor_span(min_floor, max_floor)?;
        Ok(FlagStopSet {
            base: min_floor,
            flags: vec![false; span],
            bounds: None,
        })
    }

    fn mark(&mut self, floor: Floor) {
        let Some(i) = self.index(floor) else {
            return;
        };
        self.flags[i] = true;
        self.bounds = Some(match self.bounds {
            Some((lo, hi)) => (lo.min(floor), hi.max(floor)),
            None => (floor, floor),
        });
    }

    fn clear(&mut self, floor: Floor) {
        let Some(i) = self.index(floor) else {
            return;
        };
        if !self.flags[i] {
            return;
        }
        self.flags[i] = false;
        if let Some((lo, hi)) = self.bounds {
            if floor == lo || floor == hi {
                self.recompute_bounds();
            }
        }
    }

    fn test(&self, floor: Floor) -> bool {
        self.index(floor).is_some_and(|i| self.flags[i])
    }

    fn has_above(&self, floor: Floor) -> bool {
        self.bounds.is_some_and(|(_, hi)| hi > floor)
    }

    fn has_below(&self, floor: Floor) -> bool {
        self.bounds.is_some_and(|(lo, _)| lo < floor)
    }

    fn any(&self) -> bool {
        self.bounds.is_some()
    }

    fn count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    fn snapshot(&self) -> Vec<Floor> {
        self.flags
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f)
            .map(|(i, _)| self.floor_at(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop_set::tests::{exercise, negative_floors};

    #[test]
    fn shared_behavior() {
        exercise::<FlagStopSet>();
        negative_floors::<FlagStopSet>();
    }

    #[test]
    fn bounds_follow_inner_clears_lazily() {
        let mut set = FlagStopSet::with_bounds(1, 10).unwrap();
        for floor in [2, 5, 9] {
            set.mark(floor);
        }
        set.clear(5);
        assert_eq!(set.bounds, Some((2, 9)));
        set.clear(9);
        assert_eq!(set.bounds, Some((2, 2)));
        set.clear(2);
        assert_eq!(set.bounds, None);
    }

    #[test]
    fn large_building_has_no_floor_limit() {
        let mut set = FlagStopSet::with_bounds(0, 199).unwrap();
        set.mark(150);
        assert!(set.has_above(100));
        assert_eq!(set.snapshot(), vec![150]);
    }
}
