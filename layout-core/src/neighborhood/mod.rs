//! Candidate-plan generation for the tabu search's local neighborhood.

mod swap;
mod whole_aisle;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::error::OptimizeError;
use crate::plan::Plan;
use crate::rng::seeded_rng;

/// How the neighborhood should mutate a plan to produce candidates.
#[derive(Debug, Clone, Copy)]
pub struct NeighborhoodOptions {
    /// Swap whole aisles of matching cell count instead of individual cells.
    pub swap_whole_aisles: bool,
    /// In single-cell mode, allow a shelf cell to swap with a corridor cell
    /// (not just shelf-with-shelf).
    pub allow_walkable_swap: bool,
    /// Number of accepted swaps applied per candidate.
    pub swap_count: usize,
}

impl Default for NeighborhoodOptions {
    fn default() -> Self {
        NeighborhoodOptions { swap_whole_aisles: false, allow_walkable_swap: true, swap_count: 1 }
    }
}

/// Generates `batch_size` independent candidate plans from `plan`, one
/// mutation stream per candidate so the batch can be scored with `rayon`
/// without contending on a shared RNG.
///
/// Returns [`OptimizeError::NoValidNeighbor`] when the plan structurally
/// cannot support the requested mutation mode at all (fewer than two
/// non-entrance/exit cells for single-cell swaps, or no two aisles sharing a
/// cell count for whole-aisle swaps) — not when an individual attempt merely
/// fails validation, which the generators already retry internally.
pub fn generate(plan: &Plan, batch_size: usize, seed: u64, options: &NeighborhoodOptions) -> Result<Vec<Plan>, OptimizeError> {
    if options.swap_whole_aisles {
        let aisle_cells = plan.cells_by_aisle();
        let mut size_counts: std::collections::HashMap<usize, usize> = std::collections::HashMap::new();
        for cells in aisle_cells.values() {
            *size_counts.entry(cells.len()).or_insert(0) += 1;
        }
        if !size_counts.values().any(|&count| count >= 2) {
            return Err(OptimizeError::NoValidNeighbor);
        }
    } else {
        let swappable = plan
            .positions()
            .filter(|&p| {
                let cell = plan.cell_at(p);
                !cell.is_entrance && !cell.is_exit
            })
            .count();
        if swappable < 2 {
            return Err(OptimizeError::NoValidNeighbor);
        }
    }

    let candidates = (0..batch_size)
        .into_par_iter()
        .map(|i| {
            let mut rng: StdRng = seeded_rng(seed, i as u64);
            if options.swap_whole_aisles {
                whole_aisle::generate_candidate(plan, options.swap_count, &mut rng)
            } else {
                swap::generate_candidate(plan, options.swap_count, options.allow_walkable_swap, &mut rng)
            }
        })
        .collect();
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{AisleCatalog, AisleInfo};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn catalog() -> AisleCatalog {
        Arc::new(HashMap::from([
            (1, AisleInfo { name: "a".into(), impulse_index: 0.1, product_count: 4 }),
            (2, AisleInfo { name: "b".into(), impulse_index: 0.2, product_count: 4 }),
        ]))
    }

    #[test]
    fn generate_produces_a_full_batch_of_valid_plans() {
        let grid = vec![vec![0, 1, 0], vec![0, 2, 0], vec![0, 0, 0]];
        let plan = Plan::from_layout(3, 3, &grid, (0, 0), (2, 2), catalog()).unwrap();
        let options = NeighborhoodOptions::default();
        let batch = generate(&plan, 8, 42, &options).unwrap();
        assert_eq!(batch.len(), 8);
        assert!(batch.iter().all(|p| p.validate()));
    }

    #[test]
    fn too_small_a_plan_is_reported_as_no_valid_neighbor() {
        let catalog = Arc::new(HashMap::new());
        let grid = vec![vec![0, 0]];
        let plan = Plan::from_layout(1, 2, &grid, (0, 0), (0, 1), catalog).unwrap();
        let options = NeighborhoodOptions::default();
        assert!(matches!(generate(&plan, 4, 1, &options), Err(OptimizeError::NoValidNeighbor)));
    }
}
