//! Single-trajectory tabu search over floor plans.

mod iteration;
mod score;
mod tabu;

pub use iteration::Iteration;
pub use score::{EvaluateResult, HeatMap, Score};
pub use tabu::TabuList;

use rayon::prelude::*;

use crate::error::OptimizeError;
use crate::neighborhood::{self, NeighborhoodOptions};
use crate::plan::{fingerprint, Plan};
use crate::rng::attempt_seed;

use self::score::score_plan;

/// Tunables for one optimization run. Defaults mirror the original
/// implementation's hard-coded constants.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub max_iterations: u32,
    pub tabu_size: usize,
    pub tries_allowed: u32,
    pub batch_size: usize,
    /// Fraction of the current score a candidate is allowed to fall below
    /// and still be accepted, so the trajectory can escape local optima
    /// instead of only ever climbing.
    pub acceptance_floor_ratio: f64,
    /// How each candidate in a batch is mutated, including how many swaps it
    /// applies.
    pub neighborhood: NeighborhoodOptions,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            max_iterations: 10,
            tabu_size: 10,
            tries_allowed: 5,
            batch_size: 30,
            acceptance_floor_ratio: 0.05,
            neighborhood: NeighborhoodOptions::default(),
        }
    }
}

/// Drives a single tabu search trajectory from an initial plan.
pub struct Optimizer {
    cohort: Vec<Vec<i32>>,
    seed: u64,
    tabu: TabuList,
    current_plan: Plan,
    current_score: Score,
    best_plan: Plan,
    best_score: Score,
    best_walk: HeatMap,
    best_impulse: HeatMap,
    history: Vec<Iteration>,
    next_iteration_num: u32,
}

impl Optimizer {
    /// Scores `initial_plan` against `cohort` and seeds a trajectory from it.
    /// Fails if `initial_plan` does not satisfy the plan validity invariants
    /// (it must have been built successfully by [`Plan::from_layout`] for
    /// this to occur in practice; re-checked here since a caller could hand
    /// in a plan assembled by other means).
    pub fn new(initial_plan: Plan, cohort: Vec<Vec<i32>>, seed: u64, tabu_size: usize) -> Result<Self, OptimizeError> {
        if !initial_plan.validate() {
            return Err(crate::error::PlanError::InvalidInitialPlan(
                "entrance/exit connectivity or shelf-adjacency invariant violated".into(),
            )
            .into());
        }

        let eval = score_plan(&initial_plan, &cohort, seed, 0)?;
        let history = vec![Iteration {
            iteration_num: 0,
            plan: initial_plan.clone(),
            score: eval.score,
            walk_heat_map: eval.walk_heat_map.clone(),
            impulse_heat_map: eval.impulse_heat_map.clone(),
        }];

        Ok(Optimizer {
            cohort,
            seed,
            tabu: TabuList::new(tabu_size),
            current_plan: initial_plan.clone(),
            current_score: eval.score,
            best_plan: initial_plan,
            best_score: eval.score,
            best_walk: eval.walk_heat_map,
            best_impulse: eval.impulse_heat_map,
            history,
            next_iteration_num: 1,
        })
    }

    pub fn current_score(&self) -> Score {
        self.current_score
    }

    pub fn best_score(&self) -> Score {
        self.best_score
    }

    /// Re-scores the trajectory against `new_plan` and continues the search
    /// from there, clearing the tabu list (the new plan's neighborhood has no
    /// relationship to the old one's). If `reset_best` is false, the
    /// best-so-far bookkeeping is left untouched so a caller can graft a
    /// manually-edited plan onto an existing search without discarding a
    /// better result found earlier.
    pub fn seed_with(&mut self, new_plan: Plan, reset_best: bool) -> Result<(), OptimizeError> {
        if !new_plan.validate() {
            return Err(crate::error::PlanError::InvalidInitialPlan(
                "entrance/exit connectivity or shelf-adjacency invariant violated".into(),
            )
            .into());
        }
        let eval = score_plan(&new_plan, &self.cohort, self.seed, self.next_iteration_num as u64)?;
        self.tabu = TabuList::new(self.tabu.capacity());
        self.current_plan = new_plan.clone();
        self.current_score = eval.score;
        if reset_best || eval.score.mean_total > self.best_score.mean_total {
            self.best_plan = new_plan;
            self.best_score = eval.score;
            self.best_walk = eval.walk_heat_map;
            self.best_impulse = eval.impulse_heat_map;
        }
        Ok(())
    }

    pub fn history(&self) -> &[Iteration] {
        &self.history
    }

    /// Runs up to `config.max_iterations` accepted steps, stopping early if
    /// no improving, non-tabu neighbor can be found within
    /// `config.tries_allowed` attempts. Appends a final `iteration_num == -1`
    /// entry holding the best plan found, regardless of how the run ended.
    pub fn run(&mut self, config: &OptimizerConfig) -> Result<&[Iteration], OptimizeError> {
        for _ in 0..config.max_iterations {
            let iteration = self.next_iteration_num as u64;
            let Some((plan, eval)) = self.find_best_improving_neighbor(config, iteration)? else {
                break;
            };

            let fp = fingerprint(&plan);
            self.tabu.push(fp);

            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "iteration",
                iteration_num = iteration,
                total = eval.score.mean_total,
                purchases = eval.score.mean_adjusted_purchases,
                steps = eval.score.mean_adjusted_steps,
                tabu_len = self.tabu.len(),
            );

            self.current_plan = plan.clone();
            self.current_score = eval.score;
            if eval.score.mean_total > self.best_score.mean_total {
                self.best_plan = plan.clone();
                self.best_score = eval.score;
                self.best_walk = eval.walk_heat_map.clone();
                self.best_impulse = eval.impulse_heat_map.clone();
            }

            self.history.push(Iteration {
                iteration_num: iteration as i64,
                plan,
                score: eval.score,
                walk_heat_map: eval.walk_heat_map,
                impulse_heat_map: eval.impulse_heat_map,
            });
            self.next_iteration_num += 1;
        }

        self.history.push(Iteration {
            iteration_num: -1,
            plan: self.best_plan.clone(),
            score: self.best_score,
            walk_heat_map: self.best_walk.clone(),
            impulse_heat_map: self.best_impulse.clone(),
        });
        Ok(&self.history)
    }

    /// Generates and scores up to `config.tries_allowed` batches, each of
    /// `config.batch_size` candidates, returning the first batch's
    /// best-scoring non-tabu candidate that clears the acceptance floor.
    /// The floor is relative to the *current* score, not the best ever seen,
    /// so the trajectory can wander away from a local optimum.
    fn find_best_improving_neighbor(
        &self,
        config: &OptimizerConfig,
        iteration: u64,
    ) -> Result<Option<(Plan, EvaluateResult)>, OptimizeError> {
        let worst_allowed =
            self.current_score.mean_total - self.current_score.mean_total.abs() * config.acceptance_floor_ratio;

        for attempt in 0..config.tries_allowed {
            let seed = attempt_seed(self.seed, iteration, attempt as u64);
            let candidates = neighborhood::generate(&self.current_plan, config.batch_size, seed, &config.neighborhood)?;

            let scored: Vec<(Plan, EvaluateResult)> = candidates
                .into_par_iter()
                .filter(|plan| !self.tabu.contains(fingerprint(plan)))
                .map(|plan| {
                    let eval = score_plan(&plan, &self.cohort, self.seed, iteration)?;
                    Ok::<_, OptimizeError>((plan, eval))
                })
                .collect::<Result<Vec<_>, OptimizeError>>()?;

            // Keep the first (lowest batch index) strictly-best candidate so
            // ties resolve deterministically regardless of thread scheduling.
            let mut best: Option<(Plan, EvaluateResult)> = None;
            for (plan, eval) in scored {
                let is_better = match &best {
                    None => true,
                    Some((_, best_eval)) => eval.score.mean_total > best_eval.score.mean_total,
                };
                if is_better {
                    best = Some((plan, eval));
                }
            }

            if let Some((plan, eval)) = best {
                if eval.score.mean_total > worst_allowed {
                    return Ok(Some((plan, eval)));
                }
            }
        }
        Ok(None)
    }
}
