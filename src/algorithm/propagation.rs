//! Arc-consistency (AC-3) pre-filtering of placement domains
//!
//! Variables are the requested instances; an instance's domain is its
//! placement list. The single constraint between every ordered pair of
//! instances is that their chosen placements must not overlap. Revising a
//! pair removes from the first domain any placement with no non-overlapping
//! support in the second; every revision re-enqueues the pairs whose
//! consistency it may have invalidated, iterating to a fixpoint.
//!
//! An emptied domain proves the whole request infeasible before any search
//! runs. On success the pruned domains are threaded back into the catalog
//! consumed by the downstream strategies, so work done here narrows the
//! search instead of being discarded.

use crate::algorithm::domains::PlacementSet;
use crate::spatial::placements::{Placement, PlacementCatalog};
use std::collections::VecDeque;

/// Outcome of enforcing arc consistency over a placement catalog
pub enum PropagationOutcome {
    /// Every domain kept at least one placement; the catalog reflects the
    /// pruned domains
    Consistent(PlacementCatalog),
    /// Some instance lost every placement, proving global infeasibility
    Inconsistent,
}

/// Enforce pairwise non-overlap arc consistency over the catalog
pub fn enforce_arc_consistency(catalog: &PlacementCatalog) -> PropagationOutcome {
    let instances = catalog.instances();
    let count = instances.len();
    if count < 2 {
        return PropagationOutcome::Consistent(catalog.clone());
    }

    let mut domains: Vec<PlacementSet> = instances
        .iter()
        .map(|placements| PlacementSet::all(placements.len()))
        .collect();

    let mut worklist: VecDeque<(usize, usize)> = VecDeque::new();
    for first in 0..count {
        for second in 0..count {
            if first != second {
                worklist.push_back((first, second));
            }
        }
    }

    while let Some((first, second)) = worklist.pop_front() {
        if !revise(instances, &mut domains, first, second) {
            continue;
        }
        let emptied = domains.get(first).is_none_or(PlacementSet::is_empty);
        if emptied {
            return PropagationOutcome::Inconsistent;
        }
        for other in 0..count {
            if other != first && other != second {
                worklist.push_back((other, first));
            }
        }
    }

    PropagationOutcome::Consistent(retain_domains(instances, &domains))
}

/// Remove unsupported placements from the first domain; returns whether any
/// placement was removed
fn revise(
    instances: &[Vec<Placement>],
    domains: &mut [PlacementSet],
    first: usize,
    second: usize,
) -> bool {
    let first_indices = domains.get(first).map(PlacementSet::to_vec).unwrap_or_default();
    let second_indices = domains
        .get(second)
        .map(PlacementSet::to_vec)
        .unwrap_or_default();

    let mut revised = false;
    for index in first_indices {
        let Some(candidate) = instances.get(first).and_then(|list| list.get(index)) else {
            continue;
        };
        let supported = second_indices.iter().any(|&support| {
            instances
                .get(second)
                .and_then(|list| list.get(support))
                .is_some_and(|partner| !partner.mask.intersects(candidate.mask))
        });
        if !supported {
            if let Some(domain) = domains.get_mut(first) {
                domain.remove(index);
                revised = true;
            }
        }
    }
    revised
}

/// Build a catalog keeping only the placements surviving in each domain
fn retain_domains(instances: &[Vec<Placement>], domains: &[PlacementSet]) -> PlacementCatalog {
    let pruned = instances
        .iter()
        .zip(domains.iter())
        .map(|(placements, domain)| {
            placements
                .iter()
                .enumerate()
                .filter(|(index, _)| domain.contains(*index))
                .map(|(_, placement)| placement.clone())
                .collect()
        })
        .collect();
    PlacementCatalog::from_instances(pruned)
}
