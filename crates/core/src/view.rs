use std::collections::BTreeMap;

use types::{Assignment, ClassId, DayCount, TeacherId, TeacherLoad, Weekday};

fn group_by<K: Ord>(
    assignments: &[Assignment],
    key: impl Fn(&Assignment) -> K,
) -> BTreeMap<K, Vec<Assignment>> {
    let mut out: BTreeMap<K, Vec<Assignment>> = BTreeMap::new();
    for a in assignments {
        out.entry(key(a)).or_default().push(a.clone());
    }
    for v in out.values_mut() {
        // Assignment orders by day, then lecture.
        v.sort();
    }
    out
}

/// Class-wise timetable, each list in (day, lecture) order.
pub fn by_class(assignments: &[Assignment]) -> BTreeMap<ClassId, Vec<Assignment>> {
    group_by(assignments, |a| a.class_id.clone())
}

/// Teacher-wise timetable, each list in (day, lecture) order.
pub fn by_teacher(assignments: &[Assignment]) -> BTreeMap<TeacherId, Vec<Assignment>> {
    group_by(assignments, |a| a.teacher_id.clone())
}

pub fn teacher_load(assignments: &[Assignment]) -> BTreeMap<TeacherId, TeacherLoad> {
    by_teacher(assignments)
        .into_iter()
        .map(|(teacher, list)| {
            let mut per_day = [0u32; 6];
            for a in &list {
                per_day[a.day.index()] += 1;
            }
            let load = TeacherLoad {
                total: list.len() as u32,
                per_day: Weekday::ALL
                    .into_iter()
                    .map(|day| DayCount {
                        day,
                        lectures: per_day[day.index()],
                    })
                    .collect(),
            };
            (teacher, load)
        })
        .collect()
}
