use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset tracking which placements remain in an instance's domain
///
/// Indices are positions into the instance's placement list. Provides O(1)
/// membership testing and cheap iteration for the arc-consistency worklist.
#[derive(Clone, Debug)]
pub struct PlacementSet {
    bits: BitVec,
    capacity: usize,
}

impl PlacementSet {
    /// Create a set with no placements present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Create a set containing every placement index
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
            capacity,
        }
    }

    /// Insert a placement index
    pub fn insert(&mut self, index: usize) {
        if index < self.capacity {
            self.bits.set(index, true);
        }
    }

    /// Remove a placement index
    pub fn remove(&mut self, index: usize) {
        if index < self.capacity {
            self.bits.set(index, false);
        }
    }

    /// Test placement membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Test if no placements remain
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count placements in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Extract all placement indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for PlacementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlacementSet({} of {}: {:?})",
            self.count(),
            self.capacity,
            self.to_vec()
        )
    }
}
