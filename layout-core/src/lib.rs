//! Floor-plan shelf placement optimization.
//!
//! Three layers build on each other:
//!
//! - [`plan`] models a supermarket floor as a grid of cells, derives a
//!   walkability graph from it on demand, and exposes the mutations
//!   (single-cell and whole-aisle swaps) candidate layouts are built from.
//! - [`simulator`] walks one customer through a [`plan::Plan`]: discover the
//!   nearest unvisited shelf for each shopping-list item via BFS, roll for
//!   impulse purchases along the way, then exit.
//! - [`optimizer`] runs a single-trajectory tabu search: generate a batch of
//!   candidate plans via [`neighborhood`], score each against a customer
//!   cohort, accept the best non-tabu improving candidate, repeat.
//!
//! [`io`] holds the serde schemas for everything that crosses the process
//! boundary (catalog, layout, shopping lists in; trajectory history out).
//! [`rng`] derives the deterministic, independently-seedable RNG streams that
//! let cohort simulation and candidate generation run under `rayon` without
//! sharing a `&mut Rng`.

pub mod error;
pub mod io;
pub mod neighborhood;
pub mod optimizer;
pub mod plan;
pub mod rng;
pub mod simulator;

#[cfg(feature = "instrument")]
pub use instrument;

pub use error::{OptimizeError, PlanError, SimulationError};
pub use neighborhood::NeighborhoodOptions;
pub use optimizer::{Iteration, Optimizer, OptimizerConfig, Score};
pub use plan::{AisleCatalog, AisleInfo, Cell, Plan, ProductRange};
pub use simulator::{simulate, SimulationOutcome};
