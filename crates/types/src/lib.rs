use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone,
            Debug,
            Serialize,
            Deserialize,
            ToSchema,
            JsonSchema,
            Eq,
            PartialEq,
            Hash,
            PartialOrd,
            Ord,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}
id_newtype!(TeacherId);
id_newtype!(ClassId);
id_newtype!(SubjectId);
id_newtype!(SessionId);

/// School week. Sunday is not a teaching day.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown weekday: {0}")]
pub struct UnknownWeekday(pub String);

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownWeekday(s.to_string()))
    }
}

/// One (day, lecture) cell of the weekly grid. Lectures are numbered from 1.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord,
)]
pub struct Slot {
    pub day: Weekday,
    pub lecture: u8,
}

impl Slot {
    pub fn new(day: Weekday, lecture: u8) -> Self {
        Self { day, lecture }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} L{}", self.day, self.lecture)
    }
}

/// Weekly teaching load of one subject in one class, with its assigned teacher.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Demand {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub lectures_per_week: u32,
}

impl Demand {
    pub fn new(
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
        lectures_per_week: u32,
    ) -> Self {
        Self {
            class_id: ClassId::new(class_id),
            subject_id: SubjectId::new(subject_id),
            teacher_id: TeacherId::new(teacher_id),
            lectures_per_week,
        }
    }
}

#[derive(
    Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub day: Weekday,
    pub lecture: u8,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
}

impl Assignment {
    pub fn slot(&self) -> Slot {
        Slot::new(self.day, self.lecture)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnsatisfiedDemand {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub missing: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
pub struct AllocationStats {
    pub requested: u64,
    pub placed: u32,
    pub swaps: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub assignments: Vec<Assignment>,
    pub unsatisfied_demands: Vec<UnsatisfiedDemand>,
    pub stats: AllocationStats,
}

impl Allocation {
    pub fn is_complete(&self) -> bool {
        self.unsatisfied_demands.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} of {} lecture slots scheduled",
            self.stats.placed, self.stats.requested
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub session_id: SessionId,
    pub demands: Vec<Demand>,
    #[serde(default)]
    pub max_lectures: Option<u8>,
}

/// Bell times of one lecture, `HH:MM`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeBand {
    pub lecture_number: u8,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherLoad {
    pub total: u32,
    pub per_day: Vec<DayCount>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
pub struct DayCount {
    pub day: Weekday,
    pub lectures: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Clash {
    Teacher {
        slot: Slot,
        #[serde(rename = "teacherId")]
        teacher_id: TeacherId,
        count: u32,
    },
    Class {
        slot: Slot,
        #[serde(rename = "classId")]
        class_id: ClassId,
        count: u32,
    },
}
