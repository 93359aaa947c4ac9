use std::collections::HashMap;

use super::{AisleCatalog, Cell, Plan, ProductRange};
use crate::error::PlanError;

impl Plan {
    /// Builds a `Plan` from a raw `aisle_id` grid plus explicit entrance and
    /// exit coordinates.
    ///
    /// `grid[r][c] == 0` means corridor, `> 0` names a shelf's aisle id.
    /// Legacy `-1`/`-2` sentinel encodings are resolved into entrance/exit
    /// coordinates by the caller ([`crate::io::LayoutInput`]) before reaching
    /// here.
    pub fn from_layout(
        rows: usize,
        cols: usize,
        grid: &[Vec<i32>],
        entrance: (usize, usize),
        exit: (usize, usize),
        catalog: AisleCatalog,
    ) -> Result<Plan, PlanError> {
        if grid.len() != rows || grid.iter().any(|row| row.len() != cols) {
            return Err(PlanError::MalformedLayout(format!(
                "grid dimensions do not match declared {rows}x{cols}"
            )));
        }
        if entrance.0 >= rows || entrance.1 >= cols {
            return Err(PlanError::MalformedLayout(format!("entrance {entrance:?} out of bounds")));
        }
        if exit.0 >= rows || exit.1 >= cols {
            return Err(PlanError::MalformedLayout(format!("exit {exit:?} out of bounds")));
        }
        if entrance == exit {
            return Err(PlanError::MalformedLayout("entrance and exit must be distinct cells".into()));
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (r, row) in grid.iter().enumerate() {
            for (c, &aisle_id) in row.iter().enumerate() {
                if aisle_id < 0 {
                    return Err(PlanError::MalformedLayout(format!(
                        "cell ({r}, {c}) carries unresolved sentinel value {aisle_id}"
                    )));
                }
                let mut cell = if aisle_id == 0 { Cell::corridor() } else { Cell::shelf(aisle_id) };
                if (r, c) == entrance {
                    cell.aisle_id = 0;
                    cell.is_entrance = true;
                }
                if (r, c) == exit {
                    cell.aisle_id = 0;
                    cell.is_exit = true;
                }
                cells.push(cell);
            }
        }

        assign_product_ranges(&mut cells, &catalog);

        let plan = Plan { rows, cols, cells, entrance, exit, catalog };
        if !plan.validate() {
            return Err(PlanError::MalformedLayout(
                "entrance and exit are not mutually reachable, or a shelf cell has no walkable neighbor".into(),
            ));
        }
        Ok(plan)
    }
}

/// Partitions each aisle's `product_count` evenly across the cells currently
/// carrying its id, in row-major order. Cell `i` of `n` receives the
/// half-open range `[i * step, (i + 1) * step)`, except the last cell, which
/// absorbs the remainder by extending to `product_count + 1` so no product id
/// in `1..=product_count` is left unreachable.
pub(super) fn assign_product_ranges(cells: &mut [Cell], catalog: &AisleCatalog) {
    let mut by_aisle: HashMap<i32, Vec<usize>> = HashMap::new();
    for (idx, cell) in cells.iter().enumerate() {
        if cell.is_shelf() {
            by_aisle.entry(cell.aisle_id).or_default().push(idx);
        }
    }

    for (aisle_id, idxs) in by_aisle {
        let Some(info) = catalog.get(&aisle_id) else { continue };
        if info.product_count == 0 || idxs.is_empty() {
            continue;
        }
        let n = idxs.len() as i64;
        let step = info.product_count as i64 / n;
        let last = idxs.len() - 1;
        for (i, &idx) in idxs.iter().enumerate() {
            let lo = i as i64 * step;
            let hi = if i == last { info.product_count as i64 + 1 } else { (i as i64 + 1) * step };
            cells[idx].product_range = ProductRange { lo, hi };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::AisleInfo;
    use std::sync::Arc;

    fn catalog() -> AisleCatalog {
        Arc::new(HashMap::from([
            (1, AisleInfo { name: "cereal".into(), impulse_index: 0.1, product_count: 10 }),
            (2, AisleInfo { name: "candy".into(), impulse_index: 0.9, product_count: 3 }),
        ]))
    }

    #[test]
    fn builds_a_valid_trivial_plan() {
        let grid = vec![vec![0, 1, 0], vec![0, 1, 0], vec![0, 0, 0]];
        let plan = Plan::from_layout(3, 3, &grid, (0, 0), (2, 2), catalog()).unwrap();
        assert_eq!(plan.rows(), 3);
        assert!(plan.cell_at((0, 0)).is_entrance);
        assert!(plan.cell_at((2, 2)).is_exit);
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let grid = vec![vec![0, 0]];
        assert!(matches!(
            Plan::from_layout(3, 3, &grid, (0, 0), (2, 2), catalog()),
            Err(PlanError::MalformedLayout(_))
        ));
    }

    #[test]
    fn rejects_unreachable_entrance() {
        let grid = vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]];
        assert!(matches!(
            Plan::from_layout(3, 3, &grid, (0, 0), (2, 2), catalog()),
            Err(PlanError::MalformedLayout(_))
        ));
    }

    #[test]
    fn product_ranges_partition_without_gaps() {
        let grid = vec![vec![1, 1, 1], vec![0, 0, 0], vec![0, 0, 0]];
        let plan = Plan::from_layout(3, 3, &grid, (1, 0), (2, 0), catalog()).unwrap();
        let ranges: Vec<_> = [(0, 0), (0, 1), (0, 2)].iter().map(|&p| plan.cell_at(p).product_range).collect();
        assert_eq!(ranges[0], ProductRange { lo: 0, hi: 3 });
        assert_eq!(ranges[1], ProductRange { lo: 3, hi: 6 });
        assert_eq!(ranges[2], ProductRange { lo: 6, hi: 11 });
        for id in 1..=10 {
            assert!(ranges.iter().any(|r| r.contains(id)), "product {id} unreachable");
        }
    }
}
