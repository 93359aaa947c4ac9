//! Structural invariants that must hold for any plan the crate produces,
//! from construction through every mutation the optimizer applies.

use std::collections::HashMap;
use std::sync::Arc;

use layout_core::{AisleCatalog, AisleInfo, NeighborhoodOptions, Plan};

fn catalog() -> AisleCatalog {
    Arc::new(HashMap::from([
        (1, AisleInfo { name: "cereal".into(), impulse_index: 0.2, product_count: 9 }),
        (2, AisleInfo { name: "candy".into(), impulse_index: 0.6, product_count: 5 }),
        (3, AisleInfo { name: "soda".into(), impulse_index: 0.4, product_count: 6 }),
    ]))
}

fn five_by_five() -> Plan {
    let grid = vec![
        vec![0, 0, 0, 0, 0],
        vec![0, 1, 0, 2, 0],
        vec![0, 1, 0, 2, 0],
        vec![0, 0, 3, 3, 0],
        vec![0, 0, 0, 0, 0],
    ];
    Plan::from_layout(5, 5, &grid, (0, 0), (4, 4), catalog()).unwrap()
}

#[test]
fn entrance_and_exit_remain_mutually_reachable_after_any_generated_swap() {
    let options = NeighborhoodOptions::default();
    let batch = layout_core::neighborhood::generate(&five_by_five(), 25, 77, &options).unwrap();
    for candidate in &batch {
        assert!(candidate.is_connected());
        assert!(candidate.validate());
    }
}

#[test]
fn every_shelf_cell_has_a_walkable_neighbor_after_any_accepted_swap() {
    let options = NeighborhoodOptions { swap_whole_aisles: false, allow_walkable_swap: true, swap_count: 2 };
    let batch = layout_core::neighborhood::generate(&five_by_five(), 16, 4, &options).unwrap();
    for candidate in &batch {
        for pos in candidate.positions() {
            let cell = candidate.cell_at(pos);
            if !cell.is_shelf() {
                continue;
            }
            let has_walkable_neighbor = [(-1, 0), (1, 0), (0, -1), (0, 1)].iter().any(|&(dr, dc)| {
                let r = pos.0 as isize + dr;
                let c = pos.1 as isize + dc;
                r >= 0
                    && c >= 0
                    && candidate.in_bounds((r as usize, c as usize))
                    && candidate.cell_at((r as usize, c as usize)).is_walkable()
            });
            assert!(has_walkable_neighbor, "shelf at {pos:?} has no walkable neighbor");
        }
    }
}

#[test]
fn every_product_id_in_range_is_reachable_on_some_cell_of_its_aisle() {
    let plan = five_by_five();
    for (aisle_id, info) in plan.catalog().iter() {
        if info.product_count == 0 {
            continue;
        }
        let cells: Vec<_> = plan.positions().filter(|&p| plan.cell_at(p).aisle_id == *aisle_id).collect();
        for product_id in 1..=info.product_count as i64 {
            let found = cells.iter().any(|&p| plan.cell_at(p).product_range.contains(product_id));
            assert!(found, "product {product_id} of aisle {aisle_id} is unreachable");
        }
    }
}

#[test]
fn whole_aisle_swaps_preserve_each_aisles_full_product_reachability() {
    let options = NeighborhoodOptions { swap_whole_aisles: true, allow_walkable_swap: false, swap_count: 1 };
    let plan = five_by_five();
    let batch = layout_core::neighborhood::generate(&plan, 10, 31, &options).unwrap();
    for candidate in &batch {
        for (aisle_id, info) in candidate.catalog().iter() {
            if info.product_count == 0 {
                continue;
            }
            for product_id in 1..=info.product_count as i64 {
                let found = candidate
                    .positions()
                    .filter(|&p| candidate.cell_at(p).aisle_id == *aisle_id)
                    .any(|p| candidate.cell_at(p).product_range.contains(product_id));
                assert!(found, "product {product_id} of aisle {aisle_id} lost after a whole-aisle swap");
            }
        }
    }
}

#[test]
fn fingerprint_is_stable_under_clone_and_changes_after_a_real_swap() {
    let mut plan = five_by_five();
    let before = layout_core::plan::fingerprint(&plan);
    assert_eq!(before, layout_core::plan::fingerprint(&plan.clone()));
    plan.swap_cells((1, 1), (1, 3)).unwrap();
    assert_ne!(before, layout_core::plan::fingerprint(&plan));
}

#[test]
fn neighborhood_refuses_a_plan_too_small_to_swap() {
    let catalog: AisleCatalog = Arc::new(HashMap::new());
    let grid = vec![vec![0, 0]];
    let plan = Plan::from_layout(1, 2, &grid, (0, 0), (0, 1), catalog).unwrap();
    let options = NeighborhoodOptions::default();
    let result = layout_core::neighborhood::generate(&plan, 5, 1, &options);
    assert!(matches!(result, Err(layout_core::OptimizeError::NoValidNeighbor)));
}
