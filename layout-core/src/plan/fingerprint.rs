use xxhash_rust::xxh3::xxh3_64;

use super::Plan;

/// A content hash of the plan's `aisle_id` matrix, used to recognize
/// previously-visited layouts in the tabu list. Two plans with the same
/// aisle arrangement hash identically regardless of their product-range
/// assignment or catalog, matching the original's "same shelf arrangement
/// counts as the same solution" rule.
pub fn fingerprint(plan: &Plan) -> u64 {
    let mut buf = Vec::with_capacity(plan.cells.len() * 4);
    for cell in &plan.cells {
        buf.extend_from_slice(&cell.aisle_id.to_le_bytes());
    }
    xxh3_64(&buf)
}
