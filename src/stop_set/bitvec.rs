use crate::stop_set::{StopSet, StopSetKind, floor_span, offset};
use crate::types::request::Floor;

const WORD_BITS: usize = u64::BITS as usize;

/// Bit vector of 64-bit words that grows on demand, so buildings of any
/// height are covered at one bit per floor.
///
/// Above/below queries use a "next set bit" search that skips whole empty
/// words. Trailing empty words are dropped on clear.
#[derive(Debug, Clone)]
pub struct BitVecStopSet {
    base: Floor,
    span: usize,
    words: Vec<u64>,
}

impl BitVecStopSet {
    fn position(&self, floor: Floor) -> Option<usize> {
        usize::try_from(offset(self.base, floor))
            .ok()
            .filter(|&i| i < self.span)
    }

    /// Index of the first set bit at or after `from`.
    fn next_set(&self, from: usize) -> Option<usize> {
        let mut w = from / WORD_BITS;
        let mut word = *self.words.get(w)? & (!0u64 << (from % WORD_BITS));
        loop {
            if word != 0 {
                return Some(w * WORD_BITS + word.trailing_zeros() as usize);
            }
            w += 1;
            word = *self.words.get(w)?;
        }
    }

    fn floor_at(&self, index: usize) -> Floor {
        self.base + index as Floor
    }
}

impl StopSet for BitVecStopSet {
    const KIND: StopSetKind = StopSetKind::BitVec;

    fn with_bounds(min_floor: Floor, max_floor: Floor) -> anyhow::Result<Self> {
        let span = floor_span(min_floor, max_floor)?;
        Ok(BitVecStopSet {
            base: min_floor,
            span,
            words: Vec::new(),
        })
    }

    fn mark(&mut self, floor: Floor) {
        let Some(i) = self.position(floor) else {
            return;
        };
        let w = i / WORD_BITS;
        if w >= self.words.len() {
            self.words.resize(w + 1, 0);
        }
        self.words[w] |= 1u64 << (i % WORD_BITS);
    }

    fn clear(&mut self, floor: Floor) {
        let Some(i) = self.position(floor) else {
            return;
        };
        if let Some(word) = self.words.get_mut(i / WORD_BITS) {
            *word &= !(1u64 << (i % WORD_BITS));
        }
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }

    fn test(&self, floor: Floor) -> bool {
        self.position(floor).is_some_and(|i| {
            self.words
                .get(i / WORD_BITS)
                .is_some_and(|word| word & (1u64 << (i % WORD_BITS)) != 0)
        })
    }

    fn has_above(&self, floor: Floor) -> bool {
        let off = offset(self.base, floor);
        if off < 0 {
            return self.any();
        }
        usize::try_from(off + 1).is_ok_and(|from| self.next_set(from).is_some())
    }

    fn has_below(&self, floor: Floor) -> bool {
        let off = offset(self.base, floor);
        self.next_set(0).is_some_and(|i| (i as i64) < off)
    }

    fn any(&self) -> bool {
        // trailing words are never zero, so a non-empty vector has a bit set
        !self.words.is_empty()
    }

    fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn snapshot(&self) -> Vec<Floor> {
        let mut floors = Vec::new();
        let mut from = 0;
        while let Some(i) = self.next_set(from) {
            floors.push(self.floor_at(i));
            from = i + 1;
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
        exercise::<BitVecStopSet>();
        negative_floors::<BitVecStopSet>();
    }

    #[test]
    fn grows_past_one_word() {
        let mut set = BitVecStopSet::with_bounds(1, 300).unwrap();
        assert!(set.words.is_empty());
        set.mark(200);
        assert_eq!(set.words.len(), 4);
        set.mark(3);
        assert!(set.has_above(100));
        assert!(set.has_below(200));
        assert_eq!(set.snapshot(), vec![3, 200]);

        set.clear(200);
        assert_eq!(set.words.len(), 1);
        assert!(!set.has_above(3));
        set.clear(3);
        assert!(!set.any());
    }

    #[test]
    fn next_set_skips_empty_words() {
        let mut set = BitVecStopSet::with_bounds(0, 255).unwrap();
        set.mark(130);
        assert_eq!(set.next_set(0), Some(130));
        assert_eq!(set.next_set(130), Some(130));
        assert_eq!(set.next_set(131), None);
        assert_eq!(set.next_set(1000), None);
    }
}
