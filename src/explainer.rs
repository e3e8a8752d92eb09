use crate::driver::RawSolution;
use crate::index::Indices;
use crate::types::{CourseId, MeetingSlot, StudentId};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Why a requested course went unassigned. `NoSectionsOffered` splits out of
/// a conflated "Capacity" reading for courses that were never scheduled at
/// all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnassignedReason {
    #[serde(rename = "No Sections Offered")]
    NoSectionsOffered,
    Capacity,
    #[serde(rename = "Time Conflict")]
    TimeConflict,
    Unknown,
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnassignedReason::NoSectionsOffered => "No Sections Offered",
            UnassignedReason::Capacity => "Capacity",
            UnassignedReason::TimeConflict => "Time Conflict",
            UnassignedReason::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnassignedRow {
    pub student: String,
    pub course: String,
    pub reason: UnassignedReason,
}

/// For each (student, requested course) pair with no assigned section,
/// classifies the blocking cause by inspecting the realized solution. This is
/// not a counterfactual proof of optimality: a different optimal solution
/// could have assigned the same request, so the reason reflects the returned
/// solution, not an exhaustive search over all optima.
pub fn unassigned_courses(indices: &Indices, solution: &RawSolution) -> Vec<UnassignedRow> {
    let mut rows = Vec::new();
    for (&student_id, requested) in &indices.student_requests {
        for &course_id in requested {
            let already_assigned = indices
                .course_sections
                .get(&course_id)
                .map(|secs| secs.iter().any(|&sec_id| solution.is_assigned(student_id, sec_id)))
                .unwrap_or(false);
            if already_assigned {
                continue;
            }

            rows.push(UnassignedRow {
                student: indices.student_interner.name(student_id).to_string(),
                course: indices.course_interner.name(course_id).to_string(),
                reason: classify(indices, solution, student_id, course_id),
            });
        }
    }
    rows.sort_by(|a, b| {
        (a.student.as_str(), a.course.as_str()).cmp(&(b.student.as_str(), b.course.as_str()))
    });
    rows
}

fn classify(
    indices: &Indices,
    solution: &RawSolution,
    student_id: StudentId,
    course_id: CourseId,
) -> UnassignedReason {
    let Some(sections) = indices.course_sections.get(&course_id) else {
        return UnassignedReason::NoSectionsOffered;
    };
    if sections.is_empty() {
        return UnassignedReason::NoSectionsOffered;
    }

    // Meeting slots already occupied by sections realized for this student.
    let occupied: HashSet<MeetingSlot> = indices
        .sections
        .iter()
        .filter(|sec| solution.is_assigned(student_id, sec.id))
        .flat_map(|sec| sec.meeting_slots.iter().copied())
        .collect();

    let has_capacity = sections.iter().any(|&sec_id| {
        let sec = indices.section(sec_id);
        solution.section_size.get(&sec_id).copied().unwrap_or(0) < sec.capacity
    });

    let could_fit_without_capacity = sections.iter().any(|&sec_id| {
        indices
            .section(sec_id)
            .meeting_slots
            .iter()
            .all(|slot| !occupied.contains(slot))
    });

    if !has_capacity {
        UnassignedReason::Capacity
    } else if !could_fit_without_capacity {
        UnassignedReason::TimeConflict
    } else {
        UnassignedReason::Unknown
    }
}
