use super::construct::assign_product_ranges;
use super::Plan;

/// Reasons a mutation was refused without changing the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutateError {
    /// One of the two positions is the entrance or exit cell, which never
    /// participates in a swap.
    EntranceOrExit,
}

impl Plan {
    /// Swaps the full contents (aisle id and product range) of two cells.
    /// Neither may be the entrance or exit. Does not itself check whether the
    /// result is still a valid plan — callers validate and revert as needed
    /// (see `neighborhood::swap`).
    pub fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) -> Result<(), MutateError> {
        let (ca, cb) = (self.cell_at(a), self.cell_at(b));
        if ca.is_entrance || ca.is_exit || cb.is_entrance || cb.is_exit {
            return Err(MutateError::EntranceOrExit);
        }
        let idx_a = self.index(a);
        let idx_b = self.index(b);
        self.cells.swap(idx_a, idx_b);
        Ok(())
    }

    /// Reassigns `aisle_id_a`'s cells to `aisle_id_b` and vice versa, then
    /// recomputes each aisle's product-id partition from scratch so invariant
    /// 4 (every id in `1..=product_count` reachable) holds for both aisles in
    /// their new locations.
    pub fn reassign_aisle_ids(
        &mut self,
        cells_a: &[(usize, usize)],
        aisle_id_a: i32,
        cells_b: &[(usize, usize)],
        aisle_id_b: i32,
    ) {
        for &pos in cells_a {
            self.cell_at_mut(pos).aisle_id = aisle_id_b;
        }
        for &pos in cells_b {
            self.cell_at_mut(pos).aisle_id = aisle_id_a;
        }
        assign_product_ranges(&mut self.cells, &self.catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{AisleCatalog, AisleInfo, Cell};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn two_shelf_plan() -> Plan {
        let catalog: AisleCatalog = Arc::new(HashMap::from([
            (1, AisleInfo { name: "a".into(), impulse_index: 0.1, product_count: 4 }),
            (2, AisleInfo { name: "b".into(), impulse_index: 0.2, product_count: 4 }),
        ]));
        let grid = vec![vec![0, 1, 0], vec![0, 2, 0], vec![0, 0, 0]];
        Plan::from_layout(3, 3, &grid, (0, 0), (2, 2), catalog).unwrap()
    }

    #[test]
    fn swap_cells_exchanges_aisle_ids() {
        let mut plan = two_shelf_plan();
        plan.swap_cells((0, 1), (1, 1)).unwrap();
        assert_eq!(plan.cell_at((0, 1)).aisle_id, 2);
        assert_eq!(plan.cell_at((1, 1)).aisle_id, 1);
    }

    #[test]
    fn swap_cells_refuses_entrance() {
        let mut plan = two_shelf_plan();
        assert_eq!(plan.swap_cells((0, 0), (1, 1)), Err(MutateError::EntranceOrExit));
    }

    #[test]
    fn reassign_aisle_ids_swaps_groups_and_repartitions() {
        let mut plan = two_shelf_plan();
        plan.reassign_aisle_ids(&[(0, 1)], 1, &[(1, 1)], 2);
        assert_eq!(plan.cell_at((0, 1)).aisle_id, 2);
        assert_eq!(plan.cell_at((1, 1)).aisle_id, 1);
        assert_eq!(plan.cell_at((0, 1)).product_range.hi, 5);
    }
}
