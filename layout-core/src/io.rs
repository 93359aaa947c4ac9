//! Serde schemas for the crate's external boundaries: the aisle catalog,
//! floor-plan layout, shopping lists, and the archival result a completed
//! trajectory is exported as.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::optimizer::Iteration;
use crate::plan::{AisleCatalog, AisleInfo, Plan};

/// Wire format for one catalog entry, keyed by aisle id as a string (JSON
/// object keys are always strings).
#[derive(Debug, Clone, Deserialize)]
pub struct AisleCatalogEntry {
    pub aisle_name: String,
    pub impulse_index: f64,
    pub product_count: u32,
}

pub type AisleCatalogInput = HashMap<String, AisleCatalogEntry>;

/// Parses an aisle catalog and keys it by the numeric aisle id used
/// everywhere else in the crate.
pub fn parse_catalog(input: &AisleCatalogInput) -> Result<AisleCatalog, PlanError> {
    let mut map = HashMap::with_capacity(input.len());
    for (raw_id, entry) in input {
        let aisle_id: i32 = raw_id
            .parse()
            .map_err(|_| PlanError::MalformedLayout(format!("catalog key {raw_id:?} is not an integer aisle id")))?;
        map.insert(
            aisle_id,
            AisleInfo { name: entry.aisle_name.clone(), impulse_index: entry.impulse_index, product_count: entry.product_count },
        );
    }
    Ok(Arc::new(map))
}

/// Wire format for a floor-plan layout. Accepts either the legacy sentinel
/// encoding (`-1` for the entrance cell, `-2` for the exit cell, embedded
/// directly in `grid`) or explicit `entrance`/`exit` coordinates; if both are
/// present the explicit coordinates win.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutInput {
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<Vec<i32>>,
    #[serde(default)]
    pub entrance: Option<(usize, usize)>,
    #[serde(default)]
    pub exit: Option<(usize, usize)>,
}

impl LayoutInput {
    pub fn into_plan(mut self, catalog: AisleCatalog) -> Result<Plan, PlanError> {
        if self.grid.len() != self.rows || self.grid.iter().any(|row| row.len() != self.cols) {
            return Err(PlanError::MalformedLayout(format!(
                "grid dimensions do not match declared {}x{}",
                self.rows, self.cols
            )));
        }

        for r in 0..self.rows {
            for c in 0..self.cols {
                match self.grid[r][c] {
                    -1 => {
                        self.entrance.get_or_insert((r, c));
                        self.grid[r][c] = 0;
                    }
                    -2 => {
                        self.exit.get_or_insert((r, c));
                        self.grid[r][c] = 0;
                    }
                    _ => {}
                }
            }
        }

        let entrance = self.entrance.ok_or_else(|| PlanError::MalformedLayout("no entrance cell given".into()))?;
        let exit = self.exit.ok_or_else(|| PlanError::MalformedLayout("no exit cell given".into()))?;
        Plan::from_layout(self.rows, self.cols, &self.grid, entrance, exit, catalog)
    }
}

/// A cohort of customer shopping lists, each a sequence of aisle ids.
pub type ShoppingLists = Vec<Vec<i32>>;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub total_score: f64,
    pub adjusted_purchases: f64,
    pub adjusted_steps: f64,
}

/// Archival export of a completed optimization trajectory: one entry per
/// history row, laid out as parallel arrays the way the original tooling's
/// plotting scripts expect.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryResult {
    pub grids: Vec<Vec<Vec<i32>>>,
    pub scores: Vec<ScoreRow>,
    pub it_seq: Vec<i64>,
    pub walk_heat_maps: Vec<Vec<Vec<f64>>>,
    pub impulse_heat_maps: Vec<Vec<Vec<f64>>>,
}

impl TrajectoryResult {
    pub fn from_history(history: &[Iteration]) -> Self {
        let mut result = TrajectoryResult {
            grids: Vec::with_capacity(history.len()),
            scores: Vec::with_capacity(history.len()),
            it_seq: Vec::with_capacity(history.len()),
            walk_heat_maps: Vec::with_capacity(history.len()),
            impulse_heat_maps: Vec::with_capacity(history.len()),
        };
        for it in history {
            result.grids.push(it.plan.to_sentinel_grid());
            result.scores.push(ScoreRow {
                total_score: it.score.mean_total,
                adjusted_purchases: it.score.mean_adjusted_purchases,
                adjusted_steps: it.score.mean_adjusted_steps,
            });
            result.it_seq.push(it.iteration_num);
            result.walk_heat_maps.push(it.walk_heat_map.to_rows());
            result.impulse_heat_maps.push(it.impulse_heat_map.to_rows());
        }
        result
    }
}
