use crate::config::Config;
use crate::index::Indices;
use crate::types::{MeetingSlot, SectionId, StudentId};
use good_lp::{constraint, variable, Expression, ProblemVariables, SolverModel, Variable};
use std::collections::HashMap;

/// The decision and auxiliary variables of the MILP. Kept separate from
/// `ProblemVariables` so constraints can be attached after the driver picks
/// a concrete solver backend via `.using(...)`.
pub struct Variables {
    /// `x[s, k]`, only instantiated where course(k) ∈ requests(s).
    pub x: HashMap<(StudentId, SectionId), Variable>,
    pub size: HashMap<SectionId, Variable>,
    pub dev: HashMap<SectionId, Variable>,
    pub unassigned: HashMap<StudentId, Variable>,
    /// `None` when there are no students: with no fairness-bound constraints
    /// to pin them, an always-present `u_min`/`u_max` pair would be
    /// unbounded in the objective's direction.
    pub u_min: Option<Variable>,
    pub u_max: Option<Variable>,
}

pub struct CompiledModel {
    pub problem_variables: ProblemVariables,
    pub variables: Variables,
    pub objective: Expression,
}

/// Builds the decision/auxiliary variables and the composite objective.
/// Constraints are added separately, by `add_constraints`, once the Driver
/// has attached a concrete solver backend (good_lp requires `.using(...)`
/// before constraints can be added).
pub fn build(indices: &Indices, config: &Config) -> CompiledModel {
    let mut problem_variables = ProblemVariables::new();

    let mut x: HashMap<(StudentId, SectionId), Variable> = HashMap::new();
    for (&student_id, requested_courses) in &indices.student_requests {
        for &course_id in requested_courses {
            let Some(sections) = indices.course_sections.get(&course_id) else {
                continue;
            };
            for &section_id in sections {
                x.entry((student_id, section_id))
                    .or_insert_with(|| problem_variables.add(variable().binary()));
            }
        }
    }

    let size: HashMap<SectionId, Variable> = indices
        .sections
        .iter()
        .map(|sec| (sec.id, problem_variables.add(variable().integer().min(0.0))))
        .collect();

    let dev: HashMap<SectionId, Variable> = indices
        .sections
        .iter()
        .map(|sec| (sec.id, problem_variables.add(variable().min(0.0))))
        .collect();

    let unassigned: HashMap<StudentId, Variable> = indices
        .student_requests
        .keys()
        .map(|&s| (s, problem_variables.add(variable().integer().min(0.0))))
        .collect();

    // Only create the fairness-spread bound variables when there is at
    // least one student: `add_constraints` only emits the bounding
    // constraints (constraint 8) per entry in `student_requests`, so with no
    // students `u_min`/`u_max` would otherwise be free variables with a
    // nonzero objective coefficient and no upper bound, which HiGHS reports
    // as unbounded.
    let (u_min, u_max) = if indices.student_requests.is_empty() {
        (None, None)
    } else {
        (
            Some(problem_variables.add(variable().integer().min(0.0))),
            Some(problem_variables.add(variable().integer().min(0.0))),
        )
    };

    let assignment_term: Expression = x.values().copied().map(Expression::from).sum();
    let balance_term: Expression = dev.values().copied().map(Expression::from).sum();
    let objective = match (u_min, u_max) {
        (Some(u_min), Some(u_max)) => {
            let spread_term = Expression::from(u_max) - Expression::from(u_min);
            assignment_term
                - config.balance_weight * balance_term
                - config.fairness_weight * spread_term
        }
        _ => assignment_term - config.balance_weight * balance_term,
    };

    CompiledModel {
        problem_variables,
        variables: Variables {
            x,
            size,
            dev,
            unassigned,
            u_min,
            u_max,
        },
        objective,
    }
}

/// Attaches every constraint of the scheduling MILP to a solver-backed
/// problem. Split out from `build` because good_lp only accepts constraints
/// once a solver backend has been selected via `.using(...)`.
pub fn add_constraints<M: SolverModel>(model: &mut M, indices: &Indices, vars: &Variables) {
    // 1. one section per requested course
    for (&student_id, requested_courses) in &indices.student_requests {
        for &course_id in requested_courses {
            let Some(sections) = indices.course_sections.get(&course_id) else {
                continue;
            };
            if sections.is_empty() {
                continue;
            }
            let terms: Vec<Variable> = sections
                .iter()
                .filter_map(|sec_id| vars.x.get(&(student_id, *sec_id)).copied())
                .collect();
            if terms.is_empty() {
                continue;
            }
            let sum: Expression = terms.into_iter().map(Expression::from).sum();
            model.add_constraint(constraint!(sum <= 1));
        }
    }

    // 3. capacity
    for section in &indices.sections {
        let terms: Vec<Variable> = indices
            .student_requests
            .keys()
            .filter_map(|&s| vars.x.get(&(s, section.id)).copied())
            .collect();
        if terms.is_empty() {
            continue;
        }
        let sum: Expression = terms.into_iter().map(Expression::from).sum();
        model.add_constraint(constraint!(sum <= section.capacity as f64));
    }

    // 4. no time conflict, enumerated over (day, period) pairs actually
    // observed in the input rather than a fixed universal range.
    for &(day, period) in &indices.observed_day_periods {
        let overlapping: Vec<SectionId> = indices
            .sections
            .iter()
            .filter(|sec| sec.meeting_slots.contains(&MeetingSlot { day, period }))
            .map(|sec| sec.id)
            .collect();
        if overlapping.len() < 2 {
            continue; // a lone section can't conflict with itself
        }
        for &student_id in indices.student_requests.keys() {
            let terms: Vec<Variable> = overlapping
                .iter()
                .filter_map(|sec_id| vars.x.get(&(student_id, *sec_id)).copied())
                .collect();
            if terms.len() < 2 {
                continue;
            }
            let sum: Expression = terms.into_iter().map(Expression::from).sum();
            model.add_constraint(constraint!(sum <= 1));
        }
    }

    // 5. section size linkage
    for section in &indices.sections {
        let terms: Vec<Variable> = indices
            .student_requests
            .keys()
            .filter_map(|&s| vars.x.get(&(s, section.id)).copied())
            .collect();
        let sum: Expression = terms.into_iter().map(Expression::from).sum();
        let size_var = vars.size[&section.id];
        model.add_constraint(constraint!(size_var == sum));
    }

    // 6. deviation linearization, scaled by the section count to avoid
    // dividing an Expression by a non-constant number of sections.
    for sections in indices.course_sections.values() {
        let n = sections.len();
        if n == 0 {
            continue;
        }
        let n_f = n as f64;
        let sum_size: Expression = sections
            .iter()
            .map(|id| Expression::from(vars.size[id]))
            .sum();
        for &sec_id in sections {
            let dev_var = vars.dev[&sec_id];
            let size_var = vars.size[&sec_id];
            model.add_constraint(constraint!(n_f * dev_var >= n_f * size_var - sum_size.clone()));
            model.add_constraint(constraint!(n_f * dev_var >= sum_size.clone() - n_f * size_var));
        }
    }

    // 7. unassigned counter
    for (&student_id, requested_courses) in &indices.student_requests {
        let terms: Vec<Variable> = requested_courses
            .iter()
            .filter_map(|c| indices.course_sections.get(c))
            .flat_map(|secs| secs.iter())
            .filter_map(|sec_id| vars.x.get(&(student_id, *sec_id)).copied())
            .collect();
        let assigned: Expression = terms.into_iter().map(Expression::from).sum();
        let unassigned_var = vars.unassigned[&student_id];
        let n_requested = requested_courses.len() as f64;
        model.add_constraint(constraint!(unassigned_var == n_requested - assigned));
    }

    // 8. fairness bounds
    if let (Some(u_min), Some(u_max)) = (vars.u_min, vars.u_max) {
        for &student_id in indices.student_requests.keys() {
            let unassigned_var = vars.unassigned[&student_id];
            model.add_constraint(constraint!(u_min <= unassigned_var));
            model.add_constraint(constraint!(u_max >= unassigned_var));
        }
    }
}
