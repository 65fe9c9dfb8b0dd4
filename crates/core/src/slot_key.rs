use std::fmt;

use types::{ClassId, Slot, Weekday};

use crate::{Grid, TimetableError};

const SEP: char = '-';

/// Identity of one class's cell in the weekly grid, encoded as
/// `<Day>-<lecture>-<classId>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub day: Weekday,
    pub lecture: u8,
    pub class_id: ClassId,
}

impl SlotKey {
    /// Builds a key against the default nine-lecture grid.
    pub fn make(day: Weekday, lecture: u8, class_id: ClassId) -> Result<Self, TimetableError> {
        Self::make_in(&Grid::default(), day, lecture, class_id)
    }

    pub fn make_in(
        grid: &Grid,
        day: Weekday,
        lecture: u8,
        class_id: ClassId,
    ) -> Result<Self, TimetableError> {
        grid.check(Slot::new(day, lecture))?;
        if class_id.as_str().is_empty() || class_id.as_str().contains(SEP) {
            return Err(TimetableError::MalformedKey(format!(
                "class id {class_id:?} cannot be encoded in a slot key"
            )));
        }
        Ok(Self {
            day,
            lecture,
            class_id,
        })
    }

    pub fn parse(key: &str) -> Result<Self, TimetableError> {
        Self::parse_in(&Grid::default(), key)
    }

    pub fn parse_in(grid: &Grid, key: &str) -> Result<Self, TimetableError> {
        let parts: Vec<&str> = key.split(SEP).collect();
        let [day, lecture, class_id] = parts.as_slice() else {
            return Err(TimetableError::MalformedKey(key.to_string()));
        };
        let day: Weekday = day
            .parse()
            .map_err(|_| TimetableError::MalformedKey(key.to_string()))?;
        let lecture: u8 = lecture
            .parse()
            .map_err(|_| TimetableError::MalformedKey(key.to_string()))?;
        if class_id.is_empty() {
            return Err(TimetableError::MalformedKey(key.to_string()));
        }
        Self::make_in(grid, day, lecture, ClassId::new(*class_id))
    }

    pub fn slot(&self) -> Slot {
        Slot::new(self.day, self.lecture)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEP}{}{SEP}{}", self.day, self.lecture, self.class_id)
    }
}
