use std::sync::Arc;

use allocator::GreedyAllocator;
use jobs::InMemJobs;
use timetable_core::{BellSchedule, Grid};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<InMemJobs<GreedyAllocator>>,
    pub grid: Grid,
    pub bells: BellSchedule,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let grid = Grid::new(config.max_lectures)?;
        Ok(Self {
            jobs: Arc::new(InMemJobs::new(GreedyAllocator::new(), grid)),
            grid,
            bells: BellSchedule::default(),
        })
    }

    /// The request's lecture count when given, else the configured grid.
    pub fn grid_for(&self, max_lectures: Option<u8>) -> Result<Grid, timetable_core::TimetableError> {
        match max_lectures {
            Some(n) => Grid::new(n),
            None => Ok(self.grid),
        }
    }
}
