use rand::Rng;

use crate::plan::Plan;

/// Starting from `plan`, tries to apply `swap_count` accepted single-cell
/// swaps, each validated and reverted on failure (mirroring `swap_n_shelves`'s
/// validate-then-revert discipline). Gives up after a bounded number of
/// attempts, returning whatever candidate resulted — which may equal `plan`
/// itself if nothing could be swapped in.
pub fn generate_candidate<R: Rng>(plan: &Plan, swap_count: usize, allow_walkable_swap: bool, rng: &mut R) -> Plan {
    let mut candidate = plan.clone();
    let positions: Vec<(usize, usize)> = candidate
        .positions()
        .filter(|&p| {
            let cell = candidate.cell_at(p);
            !cell.is_entrance && !cell.is_exit
        })
        .collect();
    if positions.len() < 2 {
        return candidate;
    }

    let max_attempts = swap_count.max(1) * 10;
    let mut swaps_done = 0;
    let mut attempts = 0;
    while swaps_done < swap_count && attempts < max_attempts {
        attempts += 1;
        let a = positions[rng.random_range(0..positions.len())];
        let mut b = positions[rng.random_range(0..positions.len())];
        while b == a {
            b = positions[rng.random_range(0..positions.len())];
        }

        let (ca, cb) = (candidate.cell_at(a), candidate.cell_at(b));
        if ca.is_walkable() && cb.is_walkable() {
            continue; // swapping two corridor cells changes nothing
        }
        if (ca.is_walkable() || cb.is_walkable()) && !allow_walkable_swap {
            continue;
        }

        candidate.swap_cells(a, b).expect("neither position is entrance or exit");
        if candidate.validate() {
            swaps_done += 1;
        } else {
            candidate.swap_cells(a, b).expect("reverting the same swap is always legal");
        }
    }
    candidate
}
