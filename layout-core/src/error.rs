//! Error kinds for the floor-plan optimizer core.
//!
//! Structural problems (bad input, broken invariants) surface to the caller
//! as `Err`. Runtime search conditions — no improving neighbor this attempt,
//! an unreachable shopping-list item — are normal outcomes handled inline and
//! never raised as errors; see `optimizer` and `simulator` for where each is
//! absorbed.

use thiserror::Error;

/// Failures constructing or validating a `Plan`.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("malformed layout: {0}")]
    MalformedLayout(String),
    #[error("invalid initial plan: {0}")]
    InvalidInitialPlan(String),
}

/// Failures running a customer simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("entrance cell is not part of the walkability graph")]
    UnreachableEntrance,
}

/// Failures propagated out of an optimization trajectory.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// The neighborhood generator exhausted its attempt budget without being
    /// able to construct a single candidate (e.g. fewer than two eligible
    /// swap positions exist on the plan). Trajectory termination, not a crash.
    #[error("neighborhood could not produce any candidate plan")]
    NoValidNeighbor,
}
