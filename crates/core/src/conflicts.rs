use std::collections::BTreeMap;

use thiserror::Error;
use types::{Assignment, Clash, ClassId, Slot, TeacherId, Weekday};

use crate::Grid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryConflict {
    #[error("lecture {lecture} on {day} is outside the {max}-lecture day")]
    InvalidSlot { day: Weekday, lecture: u8, max: u8 },
    #[error("a timetable entry already exists for class {class} on {day}, lecture {lecture}")]
    ClassSlotTaken {
        day: Weekday,
        lecture: u8,
        class: ClassId,
    },
    #[error("teacher {teacher} is already assigned to another class on {day}, lecture {lecture}")]
    TeacherBusy {
        day: Weekday,
        lecture: u8,
        teacher: TeacherId,
    },
}

/// Checks a manually entered lecture against an existing timetable. For an
/// edit, pass `existing` without the entry being replaced.
pub fn check_entry(
    grid: &Grid,
    existing: &[Assignment],
    candidate: &Assignment,
) -> Result<(), EntryConflict> {
    let slot = candidate.slot();
    if !grid.contains(slot) {
        return Err(EntryConflict::InvalidSlot {
            day: slot.day,
            lecture: slot.lecture,
            max: grid.max_lectures(),
        });
    }
    let same_slot: Vec<&Assignment> = existing.iter().filter(|a| a.slot() == slot).collect();
    if same_slot.iter().any(|a| a.class_id == candidate.class_id) {
        return Err(EntryConflict::ClassSlotTaken {
            day: slot.day,
            lecture: slot.lecture,
            class: candidate.class_id.clone(),
        });
    }
    if same_slot.iter().any(|a| a.teacher_id == candidate.teacher_id) {
        return Err(EntryConflict::TeacherBusy {
            day: slot.day,
            lecture: slot.lecture,
            teacher: candidate.teacher_id.clone(),
        });
    }
    Ok(())
}

/// Every teacher and class booked more than once in the same slot.
pub fn find_clashes(assignments: &[Assignment]) -> Vec<Clash> {
    let mut teachers: BTreeMap<(Slot, &TeacherId), u32> = BTreeMap::new();
    let mut classes: BTreeMap<(Slot, &ClassId), u32> = BTreeMap::new();
    for a in assignments {
        *teachers.entry((a.slot(), &a.teacher_id)).or_default() += 1;
        *classes.entry((a.slot(), &a.class_id)).or_default() += 1;
    }

    let mut out: Vec<Clash> = teachers
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|((slot, teacher), count)| Clash::Teacher {
            slot,
            teacher_id: teacher.clone(),
            count,
        })
        .collect();
    out.extend(
        classes
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|((slot, class), count)| Clash::Class {
                slot,
                class_id: class.clone(),
                count,
            }),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::SubjectId;

    fn entry(day: Weekday, lecture: u8, class: &str, teacher: &str) -> Assignment {
        Assignment {
            day,
            lecture,
            class_id: ClassId::new(class),
            subject_id: SubjectId::new("eng"),
            teacher_id: TeacherId::new(teacher),
        }
    }

    #[test]
    fn free_slot_is_accepted() {
        let existing = vec![entry(Weekday::Monday, 1, "c1", "t1")];
        let cand = entry(Weekday::Monday, 2, "c1", "t1");
        assert_eq!(check_entry(&Grid::default(), &existing, &cand), Ok(()));
    }

    #[test]
    fn class_already_has_a_lecture_there() {
        let existing = vec![entry(Weekday::Monday, 1, "c1", "t1")];
        let cand = entry(Weekday::Monday, 1, "c1", "t2");
        let err = check_entry(&Grid::default(), &existing, &cand).unwrap_err();
        assert!(matches!(err, EntryConflict::ClassSlotTaken { .. }));
        assert!(err.to_string().contains("already exists for class c1"));
    }

    #[test]
    fn teacher_is_teaching_another_class() {
        let existing = vec![entry(Weekday::Tuesday, 3, "c1", "t1")];
        let cand = entry(Weekday::Tuesday, 3, "c2", "t1");
        assert_eq!(
            check_entry(&Grid::default(), &existing, &cand),
            Err(EntryConflict::TeacherBusy {
                day: Weekday::Tuesday,
                lecture: 3,
                teacher: TeacherId::new("t1"),
            })
        );
    }

    #[test]
    fn lecture_past_the_day_is_rejected() {
        let cand = entry(Weekday::Tuesday, 10, "c2", "t1");
        assert!(matches!(
            check_entry(&Grid::default(), &[], &cand),
            Err(EntryConflict::InvalidSlot { max: 9, .. })
        ));
    }

    #[test]
    fn clashes_are_listed_per_slot() {
        let tt = vec![
            entry(Weekday::Monday, 1, "c1", "t1"),
            entry(Weekday::Monday, 1, "c2", "t1"),
            entry(Weekday::Monday, 1, "c2", "t2"),
            entry(Weekday::Monday, 2, "c1", "t1"),
        ];
        let clashes = find_clashes(&tt);
        assert_eq!(
            clashes,
            vec![
                Clash::Teacher {
                    slot: Slot::new(Weekday::Monday, 1),
                    teacher_id: TeacherId::new("t1"),
                    count: 2,
                },
                Clash::Class {
                    slot: Slot::new(Weekday::Monday, 1),
                    class_id: ClassId::new("c2"),
                    count: 2,
                },
            ]
        );
        assert!(find_clashes(&tt[3..]).is_empty());
    }
}
