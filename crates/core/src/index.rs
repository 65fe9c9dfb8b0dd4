use std::collections::HashSet;

use types::{ClassId, Slot, TeacherId};

use crate::{Grid, TimetableError};

/// Busy teachers and classes per slot, for the lifetime of one allocation run.
#[derive(Clone, Debug)]
pub struct ConstraintIndex {
    grid: Grid,
    teacher: Vec<HashSet<TeacherId>>,
    class: Vec<HashSet<ClassId>>,
}

impl ConstraintIndex {
    pub fn new(grid: Grid) -> Self {
        let n = grid.slot_count();
        Self {
            grid,
            teacher: vec![HashSet::new(); n],
            class: vec![HashSet::new(); n],
        }
    }

    pub fn teacher_busy(&self, slot: Slot, teacher: &TeacherId) -> bool {
        self.grid
            .index_of(slot)
            .is_some_and(|i| self.teacher[i].contains(teacher))
    }

    pub fn class_busy(&self, slot: Slot, class: &ClassId) -> bool {
        self.grid
            .index_of(slot)
            .is_some_and(|i| self.class[i].contains(class))
    }

    pub fn is_free(&self, slot: Slot, teacher: &TeacherId, class: &ClassId) -> bool {
        match self.grid.index_of(slot) {
            Some(i) => !self.teacher[i].contains(teacher) && !self.class[i].contains(class),
            None => false,
        }
    }

    /// Callers check `is_free` first; a clash here means the allocator broke an invariant.
    pub fn occupy(
        &mut self,
        slot: Slot,
        teacher: &TeacherId,
        class: &ClassId,
    ) -> Result<(), TimetableError> {
        self.grid.check(slot)?;
        if !self.is_free(slot, teacher, class) {
            return Err(TimetableError::SlotConflict {
                day: slot.day,
                lecture: slot.lecture,
                teacher: teacher.clone(),
                class: class.clone(),
            });
        }
        if let Some(i) = self.grid.index_of(slot) {
            self.teacher[i].insert(teacher.clone());
            self.class[i].insert(class.clone());
        }
        Ok(())
    }

    /// Returns whether both the teacher and the class were recorded at `slot`.
    pub fn release(&mut self, slot: Slot, teacher: &TeacherId, class: &ClassId) -> bool {
        let Some(i) = self.grid.index_of(slot) else {
            return false;
        };
        let t = self.teacher[i].remove(teacher);
        let c = self.class[i].remove(class);
        t && c
    }
}
