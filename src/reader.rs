use crate::driver::RawSolution;
use crate::index::Indices;
use crate::types::Day;
use serde::Serialize;
use std::collections::HashMap;

/// A single (student, course, section) assignment, de-interned back to
/// names for emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedRow {
    pub student: String,
    pub course: String,
    pub section: u32,
}

/// Result of `class_roster`: a structured not-found result rather than an
/// error, since the run state is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum RosterQuery {
    Roster(Vec<String>),
    NotFound,
}

/// A (period × day) grid of `""` or `"<course>.<section>"` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleGrid {
    pub periods: Vec<u32>,
    pub days: Vec<Day>,
    /// `cells[period_index][day_index]`.
    pub cells: Vec<Vec<String>>,
}

impl ScheduleGrid {
    pub fn cell(&self, period: u32, day: Day) -> Option<&str> {
        let period_idx = self.periods.iter().position(|&p| p == period)?;
        let day_idx = self.days.iter().position(|&d| d == day)?;
        Some(&self.cells[period_idx][day_idx])
    }
}

/// Result of `student_schedule`: a structured not-found result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ScheduleQuery {
    Schedule(ScheduleGrid),
    NotFound,
}

/// The full assigned list: sequence of (student, course, section) where
/// `x = 1` in the solution.
pub fn assigned_courses(indices: &Indices, solution: &RawSolution) -> Vec<AssignedRow> {
    let mut rows: Vec<AssignedRow> = solution
        .assigned
        .iter()
        .map(|&(student_id, section_id)| {
            let section = indices.section(section_id);
            AssignedRow {
                student: indices.student_interner.name(student_id).to_string(),
                course: indices.course_interner.name(section.course_id).to_string(),
                section: section.section_number,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        (a.student.as_str(), a.course.as_str(), a.section)
            .cmp(&(b.student.as_str(), b.course.as_str(), b.section))
    });
    rows
}

/// The roster of a single (course, section), or a not-found sentinel if that
/// section doesn't exist in the model.
pub fn class_roster(indices: &Indices, solution: &RawSolution, course: &str, section: u32) -> RosterQuery {
    let Some(course_id) = indices.course_interner.get(course) else {
        return RosterQuery::NotFound;
    };
    let Some(&section_id) = indices.section_lookup.get(&(course_id, section)) else {
        return RosterQuery::NotFound;
    };
    let mut names: Vec<String> = indices
        .student_interner
        .ids()
        .filter(|&student_id| solution.is_assigned(student_id, section_id))
        .map(|student_id| indices.student_interner.name(student_id).to_string())
        .collect();
    names.sort();
    RosterQuery::Roster(names)
}

/// Every non-empty roster across all sections (mirrors the source's
/// `get_all_class_rosters`, which likewise omits sections nobody was
/// assigned to from the bulk map).
pub fn all_class_rosters(indices: &Indices, solution: &RawSolution) -> HashMap<(String, u32), Vec<String>> {
    let mut out = HashMap::new();
    for section in &indices.sections {
        if let RosterQuery::Roster(names) = class_roster(
            indices,
            solution,
            indices.course_interner.name(section.course_id),
            section.section_number,
        ) {
            if !names.is_empty() {
                out.insert(
                    (
                        indices.course_interner.name(section.course_id).to_string(),
                        section.section_number,
                    ),
                    names,
                );
            }
        }
    }
    out
}

/// A single student's (period × day) schedule grid, or a not-found sentinel
/// if the student name is unknown.
pub fn student_schedule(indices: &Indices, solution: &RawSolution, student: &str) -> ScheduleQuery {
    let Some(student_id) = indices.student_interner.get(student) else {
        return ScheduleQuery::NotFound;
    };
    ScheduleQuery::Schedule(build_grid(indices, solution, student_id))
}

/// Every student's schedule grid (mirrors `get_all_student_schedules`).
pub fn all_student_schedules(indices: &Indices, solution: &RawSolution) -> HashMap<String, ScheduleGrid> {
    indices
        .student_interner
        .ids()
        .map(|student_id| {
            (
                indices.student_interner.name(student_id).to_string(),
                build_grid(indices, solution, student_id),
            )
        })
        .collect()
}

fn build_grid(indices: &Indices, solution: &RawSolution, student_id: u32) -> ScheduleGrid {
    let periods = indices.periods_sorted.clone();
    let days = indices.day_order.clone();
    let mut cells = vec![vec![String::new(); days.len()]; periods.len()];

    for section in &indices.sections {
        if !solution.is_assigned(student_id, section.id) {
            continue;
        }
        let label = format!(
            "{}.{}",
            indices.course_interner.name(section.course_id),
            section.section_number
        );
        for slot in &section.meeting_slots {
            if let (Some(period_idx), Some(day_idx)) = (
                periods.iter().position(|&p| p == slot.period),
                days.iter().position(|&d| d == slot.day),
            ) {
                cells[period_idx][day_idx] = label.clone();
            }
        }
    }

    ScheduleGrid { periods, days, cells }
}
