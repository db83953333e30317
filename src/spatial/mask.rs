use std::fmt;

/// Fixed-width occupancy bitmask over grid cells
///
/// Bit `i` corresponds to cell index `i = y * width + x`. Two cell sets
/// overlap iff the bitwise AND of their masks is nonzero, the union of
/// placements is the bitwise OR, and area is a popcount, so every strategy
/// shares O(1) overlap testing regardless of rectangle shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellMask(u128);

impl CellMask {
    /// Maximum number of grid cells a mask can represent
    pub const CAPACITY: usize = 128;

    /// Mask with no cells present
    pub const EMPTY: Self = Self(0);

    /// Insert a cell index
    ///
    /// Indices at or beyond [`Self::CAPACITY`] are ignored; grid validation
    /// keeps every real cell index in range.
    pub const fn insert(&mut self, index: usize) {
        if index < Self::CAPACITY {
            self.0 |= 1 << index;
        }
    }

    /// Test cell membership
    pub const fn contains(self, index: usize) -> bool {
        index < Self::CAPACITY && self.0 & (1 << index) != 0
    }

    /// Test whether two masks share any cell
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Create a new mask containing the union
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Merge another mask into this one in-place
    pub const fn union_with(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Test if no cells are present
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Count cells in the set
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the set cell indices, lowest first
    pub const fn ones(self) -> CellIndices {
        CellIndices(self.0)
    }
}

impl fmt::Display for CellMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CellMask({} cells: {:?})",
            self.count(),
            self.ones().collect::<Vec<_>>()
        )
    }
}

/// Iterator over the set cell indices of a [`CellMask`]
pub struct CellIndices(u128);

impl Iterator for CellIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(index)
    }
}
