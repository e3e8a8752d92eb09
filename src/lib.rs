//! The schedule-optimization engine: builds a mixed-integer program that
//! assigns students to class sections under capacity, time-conflict, and
//! request constraints, balances section sizes and unassignment spread, and
//! explains *why* each unfulfilled request was left unassigned.
//!
//! The boundary type is [`run::OptimizationRun`]; everything else is an
//! internal stage of its pipeline (Index Builder -> Model Builder -> Solver
//! Driver -> Solution Reader / Unassignment Explainer).

pub mod config;
pub mod driver;
pub mod error;
pub mod explainer;
pub mod index;
pub mod intern;
pub mod model;
pub mod reader;
pub mod run;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use explainer::{UnassignedReason, UnassignedRow};
pub use reader::{AssignedRow, RosterQuery, ScheduleGrid, ScheduleQuery};
pub use run::OptimizationRun;
pub use types::{Day, MeetingSlot, PeriodRow, ScheduleRow, StudentRequestRow};
