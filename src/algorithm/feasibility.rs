//! Configuration-count and area accounting used to gate strategies
//!
//! The selector uses these bounds to decide whether exact enumeration is
//! affordable and to short-circuit requests that cannot fit the free area.

use crate::spatial::placements::{ObjectSpec, PlacementCatalog};

/// Upper bound on the raw configuration count
///
/// The product of every instance's placement-list length, saturating at
/// `u128::MAX` so adversarial inputs cannot overflow the estimate. This
/// ignores overlap constraints, so it is always an overcount of the valid
/// configuration space.
pub fn configuration_count_bound(catalog: &PlacementCatalog) -> u128 {
    catalog
        .instances()
        .iter()
        .fold(1u128, |bound, placements| {
            bound.saturating_mul(placements.len() as u128)
        })
}

/// Total cell area requested across all objects, counts included
pub fn total_requested_area(objects: &[ObjectSpec]) -> usize {
    objects
        .iter()
        .map(|spec| spec.area().saturating_mul(spec.count))
        .sum()
}

/// Suffix sums of per-instance areas
///
/// Entry `i` is the area of every instance not yet placed at search depth
/// `i`; the final entry is zero. Each instance's area comes from its first
/// placement, which is safe because orientation swaps preserve area and the
/// selector never searches a catalog with an empty instance.
pub fn remaining_area_suffix(catalog: &PlacementCatalog) -> Vec<usize> {
    let instances = catalog.instances();
    let mut suffix = vec![0; instances.len() + 1];
    for (index, placements) in instances.iter().enumerate().rev() {
        let area = placements.first().map_or(0, |placement| placement.area());
        let tail = suffix.get(index + 1).copied().unwrap_or(0);
        if let Some(entry) = suffix.get_mut(index) {
            *entry = tail + area;
        }
    }
    suffix
}
