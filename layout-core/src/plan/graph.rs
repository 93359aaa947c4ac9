use std::collections::VecDeque;

use super::{NEIGHBOR_OFFSETS, Plan};

impl Plan {
    /// Shortest walkable path from `start` to `end`, inclusive of both
    /// endpoints, or `None` if no walkable path connects them.
    ///
    /// The graph is never stored explicitly — walkability is a property of
    /// each `Cell`, so BFS reads it directly off the flat grid. Rebuilding an
    /// adjacency structure on every mutation would cost more than just
    /// re-deriving it at query time, and queries (one shortest-path call per
    /// shopping-list target, a handful of times per simulated customer) are
    /// far less frequent than mutations would suggest.
    pub fn shortest_path(&self, start: (usize, usize), end: (usize, usize)) -> Option<Vec<(usize, usize)>> {
        if !self.cell_at(start).is_walkable() || !self.cell_at(end).is_walkable() {
            return None;
        }
        if start == end {
            return Some(vec![start]);
        }

        let mut visited = vec![false; self.rows * self.cols];
        let mut prev: Vec<Option<(usize, usize)>> = vec![None; self.rows * self.cols];
        visited[self.index(start)] = true;

        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for offset in NEIGHBOR_OFFSETS {
                let Some(next) = self.neighbor_pos(pos, offset) else {
                    continue;
                };
                let idx = self.index(next);
                if visited[idx] || !self.cell_at(next).is_walkable() {
                    continue;
                }
                visited[idx] = true;
                prev[idx] = Some(pos);
                if next == end {
                    return Some(reconstruct(&prev, self, start, end));
                }
                queue.push_back(next);
            }
        }
        None
    }

    /// Whether the entrance and exit lie in the same walkable component.
    pub fn is_connected(&self) -> bool {
        self.shortest_path(self.entrance, self.exit).is_some()
    }

    /// A plan is valid when entrance, exit, and every walkable cell lie in a
    /// single connected component, and every shelf cell has at least one
    /// walkable 4-neighbor (otherwise no customer could ever stand next to
    /// it).
    pub fn validate(&self) -> bool {
        if !self.is_connected() {
            return false;
        }
        let reachable = self.flood_fill_walkable(self.entrance);
        let all_walkable_reachable = self
            .positions()
            .all(|pos| !self.cell_at(pos).is_walkable() || reachable[self.index(pos)]);
        if !all_walkable_reachable {
            return false;
        }
        self.positions().all(|pos| {
            let cell = self.cell_at(pos);
            if !cell.is_shelf() {
                return true;
            }
            NEIGHBOR_OFFSETS.iter().any(|&offset| {
                self.neighbor_pos(pos, offset)
                    .is_some_and(|n| self.cell_at(n).is_walkable())
            })
        })
    }

    /// Every walkable cell reachable from `start` over walkable 4-neighbors.
    fn flood_fill_walkable(&self, start: (usize, usize)) -> Vec<bool> {
        let mut visited = vec![false; self.rows * self.cols];
        if !self.cell_at(start).is_walkable() {
            return visited;
        }
        let mut queue = VecDeque::new();
        visited[self.index(start)] = true;
        queue.push_back(start);
        while let Some(pos) = queue.pop_front() {
            for offset in NEIGHBOR_OFFSETS {
                let Some(next) = self.neighbor_pos(pos, offset) else {
                    continue;
                };
                let idx = self.index(next);
                if visited[idx] || !self.cell_at(next).is_walkable() {
                    continue;
                }
                visited[idx] = true;
                queue.push_back(next);
            }
        }
        visited
    }
}

fn reconstruct(prev: &[Option<(usize, usize)>], plan: &Plan, start: (usize, usize), end: (usize, usize)) -> Vec<(usize, usize)> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        let p = prev[plan.index(current)].expect("reconstructed path is connected to start");
        path.push(p);
        current = p;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{AisleCatalog, Cell};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn empty_catalog() -> AisleCatalog {
        Arc::new(HashMap::new())
    }

    fn corridor_plan(rows: usize, cols: usize) -> Plan {
        let mut cells = vec![Cell::corridor(); rows * cols];
        let entrance = (0, 0);
        let exit = (rows - 1, cols - 1);
        cells[entrance.0 * cols + entrance.1].is_entrance = true;
        cells[exit.0 * cols + exit.1].is_exit = true;
        Plan {
            rows,
            cols,
            cells,
            entrance,
            exit,
            catalog: empty_catalog(),
        }
    }

    #[test]
    fn shortest_path_in_open_corridor_is_manhattan_length() {
        let plan = corridor_plan(3, 3);
        let path = plan.shortest_path((0, 0), (2, 2)).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(*path.first().unwrap(), (0, 0));
        assert_eq!(*path.last().unwrap(), (2, 2));
    }

    #[test]
    fn same_start_and_end_is_a_single_cell_path() {
        let plan = corridor_plan(3, 3);
        assert_eq!(plan.shortest_path((1, 1), (1, 1)), Some(vec![(1, 1)]));
    }

    #[test]
    fn shelf_blocking_every_route_breaks_connectivity() {
        let mut plan = corridor_plan(3, 3);
        for c in 0..3 {
            *plan.cell_at_mut((1, c)) = Cell::shelf(1);
        }
        assert!(!plan.is_connected());
        assert!(plan.shortest_path((0, 0), (2, 2)).is_none());
    }

    #[test]
    fn validate_rejects_shelf_with_no_walkable_neighbor() {
        // A 3x3 ring of shelves around the center cell leaves (1,1) a shelf
        // with zero walkable neighbors, even though entrance and exit (the
        // corners) remain connected around the ring.
        let mut plan = corridor_plan(3, 3);
        for pos in [(0, 1), (1, 0), (1, 2), (2, 1), (1, 1)] {
            *plan.cell_at_mut(pos) = Cell::shelf(1);
        }
        assert!(!plan.validate());
    }

    #[test]
    fn validate_accepts_a_fully_open_grid() {
        let plan = corridor_plan(4, 4);
        assert!(plan.validate());
    }

    #[test]
    fn validate_rejects_a_walkable_pocket_sealed_off_from_entrance_and_exit() {
        // Entrance (0,0) and exit (4,4) stay connected along the top and
        // right edges of a 5x5 grid; the corridor cell at (2,2) is walled in
        // by shelves on every side, so it never appears on any entrance-exit
        // path even though each of those shelves still has it as a walkable
        // neighbor.
        let mut plan = corridor_plan(5, 5);
        for pos in [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)] {
            *plan.cell_at_mut(pos) = Cell::shelf(1);
        }
        assert!(plan.is_connected(), "entrance and exit should still reach each other around the ring");
        assert!(!plan.validate(), "the isolated pocket at (2,2) must fail the full-connectivity invariant");
    }
}
