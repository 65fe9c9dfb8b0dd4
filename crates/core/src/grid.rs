use types::{Slot, TimeBand, Weekday};

use crate::TimetableError;

pub const DEFAULT_MAX_LECTURES: u8 = 9;

/// Weekly slot universe: six teaching days times `max_lectures` lectures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    max_lectures: u8,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            max_lectures: DEFAULT_MAX_LECTURES,
        }
    }
}

impl Grid {
    pub fn new(max_lectures: u8) -> Result<Self, TimetableError> {
        if max_lectures == 0 {
            return Err(TimetableError::InvalidGrid { max_lectures });
        }
        Ok(Self { max_lectures })
    }

    pub fn max_lectures(&self) -> u8 {
        self.max_lectures
    }

    pub fn slot_count(&self) -> usize {
        Weekday::ALL.len() * self.max_lectures as usize
    }

    pub fn contains(&self, slot: Slot) -> bool {
        slot.lecture >= 1 && slot.lecture <= self.max_lectures
    }

    pub fn check(&self, slot: Slot) -> Result<(), TimetableError> {
        if self.contains(slot) {
            Ok(())
        } else {
            Err(TimetableError::InvalidSlot {
                day: slot.day,
                lecture: slot.lecture,
                max: self.max_lectures,
            })
        }
    }

    /// Dense position of `slot` in canonical order, `None` outside the grid.
    pub fn index_of(&self, slot: Slot) -> Option<usize> {
        if !self.contains(slot) {
            return None;
        }
        Some(slot.day.index() * self.max_lectures as usize + (slot.lecture as usize - 1))
    }

    /// Monday to Saturday, lecture 1 to max.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        Weekday::ALL
            .into_iter()
            .flat_map(move |day| (1..=self.max_lectures).map(move |l| Slot::new(day, l)))
    }
}

/// Daily bell timings. Defaults: first lecture at 08:00, 35-minute lectures,
/// 5-minute changeovers and a 25-minute break after lecture 7.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BellSchedule {
    pub day_start_minutes: u32,
    pub lecture_minutes: u32,
    pub gap_minutes: u32,
    pub long_break_after: u8,
    pub long_break_minutes: u32,
}

impl Default for BellSchedule {
    fn default() -> Self {
        Self {
            day_start_minutes: 8 * 60,
            lecture_minutes: 35,
            gap_minutes: 5,
            long_break_after: 7,
            long_break_minutes: 25,
        }
    }
}

impl BellSchedule {
    pub fn bands(&self, grid: &Grid) -> Vec<TimeBand> {
        let mut t = self.day_start_minutes;
        let mut out = Vec::with_capacity(grid.max_lectures() as usize);
        for n in 1..=grid.max_lectures() {
            let start = t;
            t += self.lecture_minutes;
            out.push(TimeBand {
                lecture_number: n,
                start_time: hhmm(start),
                end_time: hhmm(t),
            });
            if n == self.long_break_after {
                t += self.long_break_minutes;
            } else {
                t += self.gap_minutes;
            }
        }
        out
    }
}

fn hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}
