use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// Dense integer ids assigned by the index builder's interner. Kept as plain
// aliases rather than newtypes.
pub type StudentId = u32;
pub type CourseId = u32;
pub type SectionId = u32;

/// Day of the week a section can meet on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub fn parse(s: &str) -> Option<Day> {
        match s {
            "Monday" => Some(Day::Monday),
            "Tuesday" => Some(Day::Tuesday),
            "Wednesday" => Some(Day::Wednesday),
            "Thursday" => Some(Day::Thursday),
            "Friday" => Some(Day::Friday),
            "Saturday" => Some(Day::Saturday),
            "Sunday" => Some(Day::Sunday),
            _ => None,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        };
        write!(f, "{}", s)
    }
}

/// A (day, period) tuple at which a section meets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MeetingSlot {
    pub day: Day,
    pub period: u32,
}

/// One offering of a course: a capacity and a non-empty set of meeting slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub course_id: CourseId,
    pub section_number: u32,
    pub capacity: u32,
    pub meeting_slots: BTreeSet<MeetingSlot>,
}

impl Section {
    pub fn conflicts_with(&self, other: &Section) -> bool {
        !self.meeting_slots.is_disjoint(&other.meeting_slots)
    }
}

/// Row schemas accepted by `run()`.

/// One (student, requested course) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRequestRow {
    pub student_name: String,
    pub course_name: String,
}

/// One (course, section, capacity) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub course_name: String,
    pub section: u32,
    pub capacity: u32,
}

/// One (course, section, day, period) meeting-slot row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRow {
    pub course_name: String,
    pub section: u32,
    pub day_of_week: String,
    pub period_number: u32,
}
