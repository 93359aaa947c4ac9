use std::collections::HashMap;

use rand::Rng;

use crate::plan::Plan;

/// Starting from `plan`, tries to apply `swap_count` accepted whole-aisle
/// swaps: two aisles with the same cell count trade places entirely, and
/// product ranges are recomputed for both. Mirrors the original's grouping
/// of aisles by cell count before picking a pair to exchange.
pub fn generate_candidate<R: Rng>(plan: &Plan, swap_count: usize, rng: &mut R) -> Plan {
    let mut candidate = plan.clone();
    let mut by_size: HashMap<usize, Vec<i32>> = HashMap::new();
    for (aisle_id, cells) in candidate.cells_by_aisle() {
        by_size.entry(cells.len()).or_default().push(aisle_id);
    }
    let mut eligible_sizes: Vec<usize> = by_size.iter().filter(|(_, ids)| ids.len() >= 2).map(|(&s, _)| s).collect();
    if eligible_sizes.is_empty() {
        return candidate;
    }

    let max_attempts = swap_count.max(1) * 10;
    let mut swaps_done = 0;
    let mut attempts = 0;
    while swaps_done < swap_count && attempts < max_attempts && !eligible_sizes.is_empty() {
        attempts += 1;
        let size_slot = rng.random_range(0..eligible_sizes.len());
        let size = eligible_sizes[size_slot];
        let ids = by_size.get(&size).expect("eligible_sizes only lists known sizes");
        let i = rng.random_range(0..ids.len());
        let mut j = rng.random_range(0..ids.len());
        while j == i {
            j = rng.random_range(0..ids.len());
        }
        let (aisle_a, aisle_b) = (ids[i], ids[j]);

        let cells_by_aisle = candidate.cells_by_aisle();
        let cells_a = cells_by_aisle.get(&aisle_a).cloned().unwrap_or_default();
        let cells_b = cells_by_aisle.get(&aisle_b).cloned().unwrap_or_default();

        let mut trial = candidate.clone();
        trial.reassign_aisle_ids(&cells_a, aisle_a, &cells_b, aisle_b);
        if trial.validate() {
            candidate = trial;
            swaps_done += 1;
        }
    }
    candidate
}
