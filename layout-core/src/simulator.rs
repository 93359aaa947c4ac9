//! A single customer's stochastic walk through a `Plan`.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::error::SimulationError;
use crate::plan::{Plan, NEIGHBOR_OFFSETS};

/// The outcome of simulating one customer: the cells they walked over, in
/// order, and how many unplanned (impulse) purchases they made along the
/// way.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub path: Vec<(usize, usize)>,
    pub impulse_count: u32,
    /// Shelf cells the impulse roll actually fired next to, for heatmap
    /// accumulation.
    pub impulse_shelves: Vec<(usize, usize)>,
}

/// Walks one customer through `plan` to collect every aisle on
/// `shopping_list`, rolling for impulse purchases along every corridor cell
/// they pass, then exits.
///
/// Each shopping-list entry is resolved to a single product id drawn
/// uniformly from `1..=aisle.product_count` up front; aisles absent from the
/// catalog or with zero products are simply skipped (nothing to buy there).
/// If a target aisle's shelf is reached but that specific product id isn't
/// on the shelf cell found, the customer keeps looking past it rather than
/// giving up on the aisle.
pub fn simulate<R: Rng>(plan: &Plan, shopping_list: &[i32], rng: &mut R) -> Result<SimulationOutcome, SimulationError> {
    if !plan.cell_at(plan.entrance()).is_walkable() {
        return Err(SimulationError::UnreachableEntrance);
    }

    let mut pending: HashMap<i32, Vec<i64>> = HashMap::new();
    for &aisle_id in shopping_list {
        if let Some(info) = plan.catalog().get(&aisle_id) {
            if info.product_count > 0 {
                let product_id = rng.random_range(1..=info.product_count as i64);
                pending.entry(aisle_id).or_default().push(product_id);
            }
        }
    }
    let mut pending_aisles: HashSet<i32> = pending.keys().copied().collect();
    let mut visited_shelves: HashSet<(usize, usize)> = HashSet::new();

    let mut impulse_count = 0;
    let mut impulse_shelves = Vec::new();
    let mut path = vec![plan.entrance()];
    let mut current = plan.entrance();

    while !pending_aisles.is_empty() {
        let Some((approach, target)) = find_target(plan, current, &pending_aisles, &visited_shelves) else {
            // Remaining aisles are unreachable from here; give up on the list
            // and head for the exit with whatever was collected.
            break;
        };

        let segment = plan
            .shortest_path(current, approach)
            .expect("BFS only returns targets reachable over walkable cells");
        roll_impulses(plan, &segment, rng, &mut impulse_count, &mut impulse_shelves);
        extend_path(&mut path, &segment);

        let aisle_id = plan.cell_at(target).aisle_id;
        let range = plan.cell_at(target).product_range;
        let ids = pending.get_mut(&aisle_id).expect("target aisle is in pending_aisles");
        if let Some(pos) = ids.iter().position(|&id| range.contains(id)) {
            ids.remove(pos);
            if ids.is_empty() {
                pending_aisles.remove(&aisle_id);
            }
            visited_shelves.clear();
        } else {
            visited_shelves.insert(target);
        }
        current = approach;
    }

    let exit_path = plan
        .shortest_path(current, plan.exit())
        .expect("the entrance/exit connectivity invariant guarantees this");
    roll_impulses(plan, &exit_path, rng, &mut impulse_count, &mut impulse_shelves);
    extend_path(&mut path, &exit_path);

    Ok(SimulationOutcome { path, impulse_count, impulse_shelves })
}

/// Runs a BFS from `start` over walkable cells, looking for the first shelf
/// neighbor (in `NEIGHBOR_OFFSETS` order) belonging to a pending aisle that
/// hasn't already been ruled out this pass. Returns `(approach_cell,
/// target_shelf)` — the walkable cell the shelf was found next to, and the
/// shelf cell itself.
fn find_target(
    plan: &Plan,
    start: (usize, usize),
    pending_aisles: &HashSet<i32>,
    visited_shelves: &HashSet<(usize, usize)>,
) -> Option<((usize, usize), (usize, usize))> {
    let mut visited = vec![false; plan.rows() * plan.cols()];
    let mut queue = std::collections::VecDeque::new();
    let index = |pos: (usize, usize)| pos.0 * plan.cols() + pos.1;

    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        for offset in NEIGHBOR_OFFSETS {
            let Some(next) = neighbor(plan, pos, offset) else { continue };
            let cell = plan.cell_at(next);
            if cell.is_shelf() {
                if pending_aisles.contains(&cell.aisle_id) && !visited_shelves.contains(&next) {
                    return Some((pos, next));
                }
                continue;
            }
            if !visited[index(next)] {
                visited[index(next)] = true;
                queue.push_back(next);
            }
        }
    }
    None
}

fn neighbor(plan: &Plan, pos: (usize, usize), offset: (isize, isize)) -> Option<(usize, usize)> {
    let r = pos.0 as isize + offset.0;
    let c = pos.1 as isize + offset.1;
    if r < 0 || c < 0 {
        return None;
    }
    let p = (r as usize, c as usize);
    plan.in_bounds(p).then_some(p)
}

fn roll_impulses<R: Rng>(
    plan: &Plan,
    segment: &[(usize, usize)],
    rng: &mut R,
    impulse_count: &mut u32,
    impulse_shelves: &mut Vec<(usize, usize)>,
) {
    for &pos in segment {
        for offset in NEIGHBOR_OFFSETS {
            let Some(n) = neighbor(plan, pos, offset) else { continue };
            if impulse_shelves.contains(&n) {
                continue;
            }
            let cell = plan.cell_at(n);
            if !cell.is_shelf() {
                continue;
            }
            let Some(info) = plan.catalog().get(&cell.aisle_id) else { continue };
            if rng.random::<f64>() < info.impulse_index {
                *impulse_count += 1;
                impulse_shelves.push(n);
            }
        }
    }
}

/// Appends `segment` to `path`, dropping its first cell since it duplicates
/// the last cell already in `path`.
fn extend_path(path: &mut Vec<(usize, usize)>, segment: &[(usize, usize)]) {
    path.extend(segment.iter().skip(1));
}
