use std::collections::{BTreeMap, HashMap};

use timetable_core::{Allocate, ConstraintIndex, Grid, TimetableError};
use tracing::{debug, info, warn};
use types::{
    Allocation, AllocationStats, Assignment, ClassId, Demand, Slot, SubjectId, TeacherId,
    UnsatisfiedDemand,
};

/// First-fit allocation in canonical slot order with a single-level swap
/// when a lecture finds no free slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAllocator;

impl GreedyAllocator {
    pub fn new() -> Self {
        Self
    }
}

impl Allocate for GreedyAllocator {
    fn allocate(&self, grid: &Grid, demands: &[Demand]) -> Result<Allocation, TimetableError> {
        let merged = merge_demands(demands);
        let requested: u64 = merged.iter().map(|n| n.lectures).sum();
        info!(
            demands = merged.len(),
            requested,
            max_lectures = grid.max_lectures(),
            "allocation started"
        );

        let mut run = Run::new(*grid, &merged);
        for (di, n) in merged.iter().enumerate() {
            for _ in 0..n.lectures {
                // A failed attempt leaves the index untouched, so the rest would fail too.
                if !run.place(di)? {
                    break;
                }
            }
        }

        let out = run.finish(requested);
        info!(
            placed = out.stats.placed,
            requested,
            swaps = out.stats.swaps,
            unsatisfied = out.unsatisfied_demands.len(),
            "allocation finished"
        );
        Ok(out)
    }
}

/// One (class, subject, teacher) after merging. Counts are widened so that
/// duplicate rows can never wrap.
#[derive(Debug)]
struct Need<'a> {
    class_id: &'a ClassId,
    subject_id: &'a SubjectId,
    teacher_id: &'a TeacherId,
    lectures: u64,
}

/// Sums duplicate (class, subject, teacher) rows and drops empty ones. The
/// result is ordered by class, subject, teacher, which fixes placement order.
fn merge_demands(demands: &[Demand]) -> Vec<Need<'_>> {
    let mut acc: BTreeMap<(&ClassId, &SubjectId, &TeacherId), u64> = BTreeMap::new();
    for d in demands {
        *acc.entry((&d.class_id, &d.subject_id, &d.teacher_id))
            .or_default() += u64::from(d.lectures_per_week);
    }
    acc.into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|((class_id, subject_id, teacher_id), lectures)| Need {
            class_id,
            subject_id,
            teacher_id,
            lectures,
        })
        .collect()
}

struct Placement {
    demand: usize,
    slot: Slot,
}

struct Run<'a> {
    grid: Grid,
    demands: &'a [Need<'a>],
    index: ConstraintIndex,
    placements: Vec<Placement>,
    at: HashMap<(Slot, &'a TeacherId), usize>,
    placed: Vec<u64>,
    swaps: u32,
}

impl<'a> Run<'a> {
    fn new(grid: Grid, demands: &'a [Need<'a>]) -> Self {
        Self {
            grid,
            demands,
            index: ConstraintIndex::new(grid),
            placements: Vec::new(),
            at: HashMap::new(),
            placed: vec![0; demands.len()],
            swaps: 0,
        }
    }

    fn place(&mut self, di: usize) -> Result<bool, TimetableError> {
        let demands = self.demands;
        let d = &demands[di];
        let free = self
            .grid
            .slots()
            .find(|&s| self.index.is_free(s, d.teacher_id, d.class_id));
        match free {
            Some(slot) => {
                self.commit(di, slot)?;
                Ok(true)
            }
            None => self.try_swap(di),
        }
    }

    fn commit(&mut self, di: usize, slot: Slot) -> Result<(), TimetableError> {
        let demands = self.demands;
        let d = &demands[di];
        self.index.occupy(slot, d.teacher_id, d.class_id)?;
        self.at.insert((slot, d.teacher_id), self.placements.len());
        self.placements.push(Placement { demand: di, slot });
        self.placed[di] += 1;
        Ok(())
    }

    /// Looks for a slot where this teacher is booked with another class while
    /// our class is free, and moves that booking to a slot free for both its
    /// teacher and class. Only one placement is ever moved per request.
    fn try_swap(&mut self, di: usize) -> Result<bool, TimetableError> {
        let demands = self.demands;
        let stuck = &demands[di];
        let teacher = stuck.teacher_id;
        let grid = self.grid;

        for s in grid.slots() {
            if !self.index.teacher_busy(s, teacher) || self.index.class_busy(s, stuck.class_id) {
                continue;
            }
            let Some(&pi) = self.at.get(&(s, teacher)) else {
                continue;
            };
            let moved = &demands[self.placements[pi].demand];

            self.index.release(s, moved.teacher_id, moved.class_id);
            let target = grid
                .slots()
                .find(|&t| t != s && self.index.is_free(t, moved.teacher_id, moved.class_id));

            let Some(t) = target else {
                self.index.occupy(s, moved.teacher_id, moved.class_id)?;
                continue;
            };

            self.index.occupy(t, moved.teacher_id, moved.class_id)?;
            self.at.remove(&(s, teacher));
            self.at.insert((t, moved.teacher_id), pi);
            self.placements[pi].slot = t;
            self.commit(di, s)?;
            self.swaps += 1;
            debug!(
                teacher = %teacher,
                class = %stuck.class_id,
                displaced = %moved.class_id,
                from = %s,
                to = %t,
                "swapped lecture to make room"
            );
            return Ok(true);
        }
        Ok(false)
    }

    fn finish(self, requested: u64) -> Allocation {
        let mut assignments: Vec<Assignment> = self
            .placements
            .iter()
            .map(|p| {
                let d = &self.demands[p.demand];
                Assignment {
                    day: p.slot.day,
                    lecture: p.slot.lecture,
                    class_id: d.class_id.clone(),
                    subject_id: d.subject_id.clone(),
                    teacher_id: d.teacher_id.clone(),
                }
            })
            .collect();
        assignments.sort();

        let unsatisfied_demands: Vec<UnsatisfiedDemand> = self
            .demands
            .iter()
            .zip(&self.placed)
            .filter(|(d, &n)| n < d.lectures)
            .map(|(d, &n)| {
                let missing = d.lectures - n;
                warn!(
                    class = %d.class_id,
                    subject = %d.subject_id,
                    teacher = %d.teacher_id,
                    missing,
                    "demand could not be fully placed"
                );
                UnsatisfiedDemand {
                    class_id: d.class_id.clone(),
                    subject_id: d.subject_id.clone(),
                    teacher_id: d.teacher_id.clone(),
                    missing,
                }
            })
            .collect();

        Allocation {
            stats: AllocationStats {
                requested,
                placed: assignments.len() as u32,
                swaps: self.swaps,
            },
            assignments,
            unsatisfied_demands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Weekday;

    #[test]
    fn duplicate_rows_are_merged_and_zero_rows_dropped() {
        let rows = [
            Demand::new("c2", "eng", "t1", 2),
            Demand::new("c1", "math", "t1", 1),
            Demand::new("c2", "eng", "t1", 3),
            Demand::new("c1", "art", "t3", 0),
        ];
        let merged: Vec<(&str, &str, u64)> = merge_demands(&rows)
            .iter()
            .map(|n| (n.class_id.as_str(), n.subject_id.as_str(), n.lectures))
            .collect();
        assert_eq!(merged, vec![("c1", "math", 1), ("c2", "eng", 5)]);
    }

    #[test]
    fn duplicate_rows_past_u32_keep_an_exact_shortfall() {
        let big = u32::MAX / 2 + 10;
        let out = GreedyAllocator
            .allocate(
                &Grid::new(1).unwrap(),
                &[Demand::new("c", "s", "t", big), Demand::new("c", "s", "t", big)],
            )
            .unwrap();
        let total = 2 * u64::from(big);
        assert_eq!(out.stats.requested, total);
        assert_eq!(out.stats.placed, 6);
        assert_eq!(out.unsatisfied_demands[0].missing, total - 6);
    }

    #[test]
    fn swap_moves_a_booking_to_free_the_teacher() {
        // One lecture per day: the only slot where t is free for class b is
        // Monday, held by t with class a, which can move to Tuesday.
        let grid = Grid::new(1).unwrap();
        let demands = vec![
            Demand::new("a", "a1", "t", 1),
            Demand::new("aa", "x", "v", 1),
            Demand::new("b", "b1", "v", 5),
            Demand::new("b", "b2", "t", 1),
        ];
        let out = GreedyAllocator.allocate(&grid, &demands).unwrap();
        assert!(out.is_complete());
        assert_eq!(out.stats.swaps, 1);
        assert_eq!(out.stats.placed, 8);

        let at = |class: &str, subject: &str| -> Vec<Weekday> {
            out.assignments
                .iter()
                .filter(|x| x.class_id.as_str() == class && x.subject_id.as_str() == subject)
                .map(|x| x.day)
                .collect()
        };
        assert_eq!(at("a", "a1"), vec![Weekday::Tuesday]);
        assert_eq!(at("b", "b2"), vec![Weekday::Monday]);
        assert_eq!(at("aa", "x"), vec![Weekday::Monday]);
        assert!(timetable_core::find_clashes(&out.assignments).is_empty());
    }

    #[test]
    fn no_swap_when_the_displaced_lecture_has_nowhere_to_go() {
        let grid = Grid::new(1).unwrap();
        let demands = vec![
            Demand::new("a", "a1", "t", 6),
            Demand::new("b", "b1", "t", 1),
        ];
        let out = GreedyAllocator.allocate(&grid, &demands).unwrap();
        assert_eq!(out.stats.swaps, 0);
        assert_eq!(out.stats.placed, 6);
        assert_eq!(
            out.unsatisfied_demands,
            vec![UnsatisfiedDemand {
                class_id: ClassId::new("b"),
                subject_id: SubjectId::new("b1"),
                teacher_id: TeacherId::new("t"),
                missing: 1,
            }]
        );
    }

    #[test]
    fn empty_input_is_an_empty_complete_allocation() {
        let out = GreedyAllocator.allocate(&Grid::default(), &[]).unwrap();
        assert!(out.assignments.is_empty());
        assert!(out.is_complete());
        assert_eq!(out.summary(), "0 of 0 lecture slots scheduled");
    }
}
