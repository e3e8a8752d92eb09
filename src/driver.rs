use crate::config::Config;
use crate::error::{Error, Result};
use crate::index::Indices;
use crate::model::{self, CompiledModel};
use crate::types::{SectionId, StudentId};
use good_lp::{default_solver, Solution, SolverModel};
use log::{info, trace};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// The solved model's extracted variable values. Materialized immediately
/// after `solve()` returns so the `good_lp` problem and variable maps can be
/// dropped right away; only this compact vector and the `Indices` survive
/// into the reader/explainer stages.
pub struct RawSolution {
    pub assigned: HashSet<(StudentId, SectionId)>,
    pub section_size: HashMap<SectionId, u32>,
    pub time_limited: bool,
}

impl RawSolution {
    pub fn is_assigned(&self, student_id: StudentId, section_id: SectionId) -> bool {
        self.assigned.contains(&(student_id, section_id))
    }
}

/// Invokes the external MILP solver with a bounded wall-clock budget, pinned
/// to a single thread and fixed seed for reproducible runs, and extracts the
/// solution vector.
pub fn solve(compiled: CompiledModel, indices: &Indices, config: &Config) -> Result<RawSolution> {
    let CompiledModel {
        problem_variables,
        variables,
        objective,
    } = compiled;

    info!(
        "solving MILP with {} assignment variables over {} sections, time limit {}s",
        variables.x.len(),
        indices.sections.len(),
        config.solver_time_limit_sec
    );

    let mut problem = problem_variables
        .maximise(objective)
        .using(default_solver)
        .set_option("threads", 1) // reproducible solves across runs
        .set_option("random_seed", 1234)
        .set_option("log_to_console", "false")
        .set_time_limit(config.solver_time_limit_sec as f64);

    model::add_constraints(&mut problem, indices, &variables);

    trace!("handing model to solver");
    let start = Instant::now();
    let solution = problem.solve().map_err(|e| {
        // The all-zeros assignment is always feasible and the objective is
        // bounded above by the number of (student, requested-course) pairs,
        // so infeasible/unbounded termination is a modeling bug, not a
        // legitimate outcome.
        let message = format!("{:?}", e);
        if message.contains("Infeasible") || message.contains("Unbounded") {
            Error::SolverInfeasibleOrUnbounded(message)
        } else {
            Error::SolverUnavailable(message)
        }
    })?;
    let elapsed = start.elapsed();
    trace!("solver returned in {:.2?}", elapsed);

    // `good_lp::Solution` doesn't expose the backend's termination status,
    // so "time-limited" is approximated from elapsed wall-clock time against
    // the configured budget (DESIGN.md, Open Question 4).
    let budget = Duration::from_secs_f64(config.solver_time_limit_sec as f64);
    let time_limited =
        budget.as_secs_f64() > 0.0 && elapsed.as_secs_f64() >= 0.95 * budget.as_secs_f64();

    let mut assigned = HashSet::new();
    for (&(student_id, section_id), &var) in &variables.x {
        if solution.value(var) >= 0.5 {
            assigned.insert((student_id, section_id));
        }
    }

    let mut section_size: HashMap<SectionId, u32> = HashMap::new();
    for section in &indices.sections {
        let count = assigned
            .iter()
            .filter(|(_, sec_id)| *sec_id == section.id)
            .count() as u32;
        section_size.insert(section.id, count);
    }

    info!(
        "solve complete: {} assignments{}",
        assigned.len(),
        if time_limited { " (time-limited)" } else { "" }
    );

    Ok(RawSolution {
        assigned,
        section_size,
        time_limited,
    })
}
