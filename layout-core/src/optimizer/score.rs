use rayon::prelude::*;

use crate::error::SimulationError;
use crate::plan::Plan;
use crate::rng::customer_rng;
use crate::simulator::simulate;

/// Per-plan fitness: mean adjusted purchases minus mean adjusted steps across
/// the customer cohort, plus its two components for inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub mean_total: f64,
    pub mean_adjusted_purchases: f64,
    pub mean_adjusted_steps: f64,
}

/// A normalized accumulation of per-cell visit counts across a cohort.
#[derive(Debug, Clone)]
pub struct HeatMap {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl HeatMap {
    fn zeros(rows: usize, cols: usize) -> Self {
        HeatMap { rows, cols, data: vec![0.0; rows * cols] }
    }

    fn increment(&mut self, pos: (usize, usize)) {
        self.data[pos.0 * self.cols + pos.1] += 1.0;
    }

    /// Min-max normalizes in place; an all-equal map (including all-zero)
    /// becomes all zeros rather than dividing by zero.
    fn normalize(&mut self) {
        let min = self.data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max <= min {
            self.data.fill(0.0);
            return;
        }
        let span = max - min;
        for v in &mut self.data {
            *v = (*v - min) / span;
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(|row| row.to_vec()).collect()
    }
}

/// The score and heatmaps produced by simulating a full cohort against one
/// plan.
#[derive(Debug, Clone)]
pub struct EvaluateResult {
    pub score: Score,
    pub walk_heat_map: HeatMap,
    pub impulse_heat_map: HeatMap,
}

/// Simulates every shopping list in `cohort` against `plan` in parallel, one
/// RNG stream per customer derived from `(base_seed, iteration, customer
/// index)`, then folds the per-customer outcomes into a score and two
/// heatmaps.
pub fn score_plan(plan: &Plan, cohort: &[Vec<i32>], base_seed: u64, iteration: u64) -> Result<EvaluateResult, SimulationError> {
    let outcomes = cohort
        .par_iter()
        .enumerate()
        .map(|(i, list)| {
            let mut rng = customer_rng(base_seed, iteration, i);
            simulate(plan, list, &mut rng)
        })
        .collect::<Result<Vec<_>, SimulationError>>()?;

    let mut walk = HeatMap::zeros(plan.rows(), plan.cols());
    let mut impulse = HeatMap::zeros(plan.rows(), plan.cols());
    let mut total_a = 0.0;
    let mut total_s = 0.0;
    let mut total = 0.0;

    for (outcome, list) in outcomes.iter().zip(cohort.iter()) {
        let denom = list.len().max(1) as f64;
        let a = outcome.impulse_count as f64 / denom;
        let s = outcome.path.len() as f64 / denom;
        total_a += a;
        total_s += s;
        total += a - s;
        for &pos in &outcome.path {
            walk.increment(pos);
        }
        for &pos in &outcome.impulse_shelves {
            impulse.increment(pos);
        }
    }

    walk.normalize();
    impulse.normalize();

    let n = cohort.len().max(1) as f64;
    Ok(EvaluateResult {
        score: Score { mean_total: total / n, mean_adjusted_purchases: total_a / n, mean_adjusted_steps: total_s / n },
        walk_heat_map: walk,
        impulse_heat_map: impulse,
    })
}
