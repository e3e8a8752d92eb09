use crate::config::Config;
use crate::driver::{self, RawSolution};
use crate::error::Result;
use crate::explainer::{self, UnassignedRow};
use crate::index::{self, Indices};
use crate::model;
use crate::reader::{self, AssignedRow, RosterQuery, ScheduleGrid, ScheduleQuery};
use crate::types::{PeriodRow, ScheduleRow, StudentRequestRow};
use log::info;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Unbuilt,
    Built,
    Solved,
    Read,
}

/// A single schedule-optimization run: owns its own config, indices, and
/// solution, with no shared mutable state, so independent runs are safe to
/// execute concurrently. Lifecycle is `Unbuilt -> Built -> Solved -> Read`,
/// one-way.
pub struct OptimizationRun {
    state: RunState,
    config: Config,
    indices: Option<Indices>,
    solution: Option<RawSolution>,
}

impl OptimizationRun {
    pub fn new(config: Config) -> Self {
        OptimizationRun {
            state: RunState::Unbuilt,
            config,
            indices: None,
            solution: None,
        }
    }

    /// Builds indices, builds the model, and solves it. The only operation
    /// that can fail: an error at any of those three stages aborts the run.
    pub fn run(
        &mut self,
        students: &[StudentRequestRow],
        schedules: &[ScheduleRow],
        periods: &[PeriodRow],
    ) -> Result<()> {
        let indices = index::build_indices(students, schedules, periods)?;
        self.state = RunState::Built;
        info!(
            "index built: {} students, {} courses, {} sections",
            indices.student_interner.len(),
            indices.course_interner.len(),
            indices.sections.len()
        );

        let compiled = model::build(&indices, &self.config);
        let solution = driver::solve(compiled, &indices, &self.config)?;
        self.state = RunState::Solved;

        self.indices = Some(indices);
        self.solution = Some(solution);
        Ok(())
    }

    /// Whether the solver's best incumbent was accepted on timeout rather
    /// than proven optimal. Not itself an error condition.
    pub fn is_time_limited(&self) -> bool {
        self.solution.as_ref().map(|s| s.time_limited).unwrap_or(false)
    }

    /// Reading before `Solved` is a fatal programmer error, so it's asserted
    /// rather than threaded through a recoverable `Result`. Any read
    /// transitions `Solved -> Read`; further reads are served from the same
    /// retained snapshot.
    fn ensure_solved(&mut self) -> (&Indices, &RawSolution) {
        assert!(
            matches!(self.state, RunState::Solved | RunState::Read),
            "OptimizationRun read before it was solved"
        );
        self.state = RunState::Read;
        (self.indices.as_ref().unwrap(), self.solution.as_ref().unwrap())
    }

    pub fn assigned_courses(&mut self) -> Vec<AssignedRow> {
        let (indices, solution) = self.ensure_solved();
        reader::assigned_courses(indices, solution)
    }

    pub fn unassigned_courses(&mut self) -> Vec<UnassignedRow> {
        let (indices, solution) = self.ensure_solved();
        explainer::unassigned_courses(indices, solution)
    }

    /// `class_roster` miss is a structured `RosterQuery::NotFound`, not an
    /// `Err` - the run state is unchanged on a miss.
    pub fn class_roster(&mut self, course: &str, section: u32) -> RosterQuery {
        let (indices, solution) = self.ensure_solved();
        reader::class_roster(indices, solution, course, section)
    }

    /// `student_schedule` miss is a structured `ScheduleQuery::NotFound`.
    pub fn student_schedule(&mut self, student: &str) -> ScheduleQuery {
        let (indices, solution) = self.ensure_solved();
        reader::student_schedule(indices, solution, student)
    }

    pub fn all_class_rosters(&mut self) -> HashMap<(String, u32), Vec<String>> {
        let (indices, solution) = self.ensure_solved();
        reader::all_class_rosters(indices, solution)
    }

    pub fn all_student_schedules(&mut self) -> HashMap<String, ScheduleGrid> {
        let (indices, solution) = self.ensure_solved();
        reader::all_student_schedules(indices, solution)
    }
}
