use thiserror::Error;

/// The core's error taxonomy. Only the failure modes stages 1-3 (Index
/// Builder, Model Builder, Solver Driver) can actually raise are named here;
/// query misses at the Reader/Explainer stage are structured not-found
/// results instead (see `reader::RosterQuery` / `reader::ScheduleQuery`),
/// not errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("solver unavailable: {0}")]
    SolverUnavailable(String),

    #[error("solver returned infeasible or unbounded result: {0}")]
    SolverInfeasibleOrUnbounded(String),
}

pub type Result<T> = std::result::Result<T, Error>;
