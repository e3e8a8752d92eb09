use crate::error::{Error, Result};
use crate::intern::Interner;
use crate::types::{
    CourseId, Day, MeetingSlot, PeriodRow, ScheduleRow, Section, SectionId, StudentId,
    StudentRequestRow,
};
use log::trace;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// The compact, solver-friendly lookups built from the raw input tables.
/// Everything downstream of this point works over dense integer ids;
/// student/course names only reappear when the reader/explainer de-intern
/// them for emission.
#[derive(Debug, Clone, Default)]
pub struct Indices {
    pub student_interner: Interner,
    pub course_interner: Interner,

    /// All sections, indexed by `SectionId`.
    pub sections: Vec<Section>,
    /// (course id, section number) -> section id, the reverse map needed to
    /// de-intern section keys for roster/schedule queries.
    pub section_lookup: HashMap<(CourseId, u32), SectionId>,
    /// course id -> sections offered for that course. A course absent from
    /// this map (or mapped to an empty set) has zero sections offered.
    /// `BTreeMap` so the model builder creates variables and constraints in
    /// deterministic order.
    pub course_sections: BTreeMap<CourseId, BTreeSet<SectionId>>,
    /// Flat (section, day, period) set used by overlap queries.
    pub section_periods: HashSet<(SectionId, Day, u32)>,
    /// student id -> requested course ids. `BTreeMap` for the same
    /// determinism reason as `course_sections`.
    pub student_requests: BTreeMap<StudentId, BTreeSet<CourseId>>,

    /// (day, period) pairs actually present in the input, used to bound the
    /// no-time-conflict constraint enumeration to observed values only
    /// rather than a fixed universal range.
    pub observed_day_periods: BTreeSet<(Day, u32)>,
    /// Days in first-encounter order, for the student-schedule grid's
    /// column order.
    pub day_order: Vec<Day>,
    /// Period numbers present in the input, sorted ascending, for the grid's
    /// row order.
    pub periods_sorted: Vec<u32>,
}

impl Indices {
    pub fn course_has_sections(&self, course_id: CourseId) -> bool {
        self.course_sections
            .get(&course_id)
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id as usize]
    }
}

/// Builds the Index Builder's four lookups from pre-validated tabular input.
/// Deterministic: identical input (same row order) yields identical ids and
/// identical lookup contents every time.
pub fn build_indices(
    students: &[StudentRequestRow],
    schedules: &[ScheduleRow],
    periods: &[PeriodRow],
) -> Result<Indices> {
    let mut idx = Indices::default();

    for row in schedules {
        if row.capacity == 0 {
            return Err(Error::PreconditionViolation(format!(
                "section ({}, {}) has non-positive capacity {}",
                row.course_name, row.section, row.capacity
            )));
        }
        let course_id = idx.course_interner.intern(&row.course_name);
        let section_id = idx.sections.len() as SectionId;
        idx.sections.push(Section {
            id: section_id,
            course_id,
            section_number: row.section,
            capacity: row.capacity,
            meeting_slots: BTreeSet::new(),
        });
        idx.section_lookup.insert((course_id, row.section), section_id);
        idx.course_sections
            .entry(course_id)
            .or_default()
            .insert(section_id);
    }
    trace!("indexed {} sections from {} schedule rows", idx.sections.len(), schedules.len());

    let mut day_seen = HashSet::new();
    let mut period_seen = BTreeSet::new();
    for row in periods {
        let Some(day) = Day::parse(&row.day_of_week) else {
            return Err(Error::PreconditionViolation(format!(
                "unrecognized day of week '{}'",
                row.day_of_week
            )));
        };
        let course_id = match idx.course_interner.get(&row.course_name) {
            Some(id) => id,
            None => {
                // A period row for a course never offered in the schedule
                // table is simply not actionable here; upstream referential
                // integrity is someone else's job.
                trace!(
                    "skipping period row for unknown course '{}'",
                    row.course_name
                );
                continue;
            }
        };
        let Some(&section_id) = idx.section_lookup.get(&(course_id, row.section)) else {
            trace!(
                "skipping period row for unknown section ({}, {})",
                row.course_name, row.section
            );
            continue;
        };

        idx.sections[section_id as usize]
            .meeting_slots
            .insert(MeetingSlot { day, period: row.period_number });
        idx.section_periods.insert((section_id, day, row.period_number));

        if day_seen.insert(day) {
            idx.day_order.push(day);
        }
        period_seen.insert(row.period_number);
        idx.observed_day_periods.insert((day, row.period_number));
    }
    idx.periods_sorted = period_seen.into_iter().collect();

    for row in students {
        let student_id = idx.student_interner.intern(&row.student_name);
        let course_id = idx.course_interner.intern(&row.course_name);
        idx.student_requests
            .entry(student_id)
            .or_default()
            .insert(course_id);
    }
    trace!(
        "indexed {} students requesting over {} distinct courses",
        idx.student_interner.len(),
        idx.course_interner.len()
    );

    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(student: &str, course: &str) -> StudentRequestRow {
        StudentRequestRow {
            student_name: student.to_string(),
            course_name: course.to_string(),
        }
    }

    #[test]
    fn empty_input_yields_empty_indices() {
        let idx = build_indices(&[], &[], &[]).unwrap();
        assert!(idx.sections.is_empty());
        assert!(idx.student_requests.is_empty());
    }

    #[test]
    fn course_with_zero_sections_yields_empty_set() {
        let students = vec![row("A", "Ghost Course")];
        let idx = build_indices(&students, &[], &[]).unwrap();
        let course_id = idx.course_interner.get("Ghost Course").unwrap();
        assert!(!idx.course_has_sections(course_id));
    }

    #[test]
    fn rebuilding_twice_is_deterministic() {
        let students = vec![row("A", "Math"), row("B", "Math"), row("A", "Art")];
        let schedules = vec![ScheduleRow {
            course_name: "Math".to_string(),
            section: 1,
            capacity: 10,
        }];
        let periods = vec![PeriodRow {
            course_name: "Math".to_string(),
            section: 1,
            day_of_week: "Monday".to_string(),
            period_number: 1,
        }];

        let first = build_indices(&students, &schedules, &periods).unwrap();
        let second = build_indices(&students, &schedules, &periods).unwrap();

        assert_eq!(first.sections.len(), second.sections.len());
        assert_eq!(
            first.course_interner.get("Math"),
            second.course_interner.get("Math")
        );
        assert_eq!(
            first.student_interner.get("A"),
            second.student_interner.get("A")
        );
        assert_eq!(first.observed_day_periods, second.observed_day_periods);
    }

    #[test]
    fn rejects_non_positive_capacity() {
        let schedules = vec![ScheduleRow {
            course_name: "Math".to_string(),
            section: 1,
            capacity: 0,
        }];
        let err = build_indices(&[], &schedules, &[]).unwrap_err();
        assert!(matches!(err, Error::PreconditionViolation(_)));
    }

    #[test]
    fn rejects_unknown_day_name() {
        let schedules = vec![ScheduleRow {
            course_name: "Math".to_string(),
            section: 1,
            capacity: 10,
        }];
        let periods = vec![PeriodRow {
            course_name: "Math".to_string(),
            section: 1,
            day_of_week: "Funday".to_string(),
            period_number: 1,
        }];
        let err = build_indices(&[], &schedules, &periods).unwrap_err();
        assert!(matches!(err, Error::PreconditionViolation(_)));
    }
}
