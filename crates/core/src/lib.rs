pub mod conflicts;
pub mod grid;
pub mod index;
pub mod slot_key;
pub mod view;

use std::collections::BTreeMap;

use thiserror::Error;

pub use conflicts::{check_entry, find_clashes, EntryConflict};
pub use grid::{BellSchedule, Grid, DEFAULT_MAX_LECTURES};
pub use index::ConstraintIndex;
pub use slot_key::SlotKey;
pub use types::{
    Allocation, AllocationRequest, AllocationStats, Assignment, ClassId, Demand, Slot, SubjectId,
    TeacherId, UnsatisfiedDemand, Weekday,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimetableError {
    #[error("invalid slot: {day} lecture {lecture} (lectures run 1..={max})")]
    InvalidSlot { day: Weekday, lecture: u8, max: u8 },
    #[error("a week needs at least one lecture per day, got max_lectures={max_lectures}")]
    InvalidGrid { max_lectures: u8 },
    #[error("malformed slot key: {0}")]
    MalformedKey(String),
    #[error("slot conflict at {day} lecture {lecture}: teacher {teacher} or class {class} already busy")]
    SlotConflict {
        day: Weekday,
        lecture: u8,
        teacher: TeacherId,
        class: ClassId,
    },
}

/// Every problem found in a demand list, one message per entry.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid demands: {}", .0.join("; "))]
    Problems(Vec<String>),
}

/// Reports every problem in a demand list. Allocation itself tolerates
/// overloads and reports them as unsatisfied; this is the up-front check.
pub fn validate_demands(demands: &[Demand], grid: &Grid) -> Result<(), ValidationError> {
    let mut errors: Vec<String> = Vec::new();

    fn chk_id(kind: &str, id: &str, row: usize, errors: &mut Vec<String>) {
        if id.trim().is_empty() {
            errors.push(format!("demand {row} has an empty {kind} id"));
        } else if id.contains('-') {
            errors.push(format!("demand {row} {kind} id {id} contains '-'"));
        }
    }

    let mut per_class: BTreeMap<&str, u64> = BTreeMap::new();
    let mut per_teacher: BTreeMap<&str, u64> = BTreeMap::new();

    for (row, d) in demands.iter().enumerate() {
        chk_id("class", d.class_id.as_str(), row, &mut errors);
        chk_id("subject", d.subject_id.as_str(), row, &mut errors);
        chk_id("teacher", d.teacher_id.as_str(), row, &mut errors);
        if d.lectures_per_week == 0 {
            errors.push(format!(
                "demand {row} ({}/{}) has lecturesPerWeek=0",
                d.class_id, d.subject_id
            ));
        }
        *per_class.entry(d.class_id.as_str()).or_default() += d.lectures_per_week as u64;
        *per_teacher.entry(d.teacher_id.as_str()).or_default() += d.lectures_per_week as u64;
    }

    let capacity = grid.slot_count() as u64;
    for (class, total) in per_class {
        if total > capacity {
            errors.push(format!(
                "class {class} needs {total} lectures but the week has {capacity} slots"
            ));
        }
    }
    for (teacher, total) in per_teacher {
        if total > capacity {
            errors.push(format!(
                "teacher {teacher} is demanded for {total} lectures but the week has {capacity} slots"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Problems(errors))
    }
}

/// A synchronous allocation policy. Each call owns its own occupancy state,
/// so one implementation can serve concurrent sessions.
pub trait Allocate: Send + Sync + 'static {
    fn allocate(&self, grid: &Grid, demands: &[Demand]) -> Result<Allocation, TimetableError>;
}
