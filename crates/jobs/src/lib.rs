use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use timetable_core::{Allocate, Grid};
use tracing::{error, info};
use types::{Allocation, AllocationRequest, SessionId};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct JobId(pub String);

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(tag = "status")]
pub enum JobStatus {
    Queued,
    Running,
    Solved { result: Allocation },
    Partial { result: Allocation },
    Failed { message: String },
}

impl JobStatus {
    pub fn result(&self) -> Option<&Allocation> {
        match self {
            JobStatus::Solved { result } | JobStatus::Partial { result } => Some(result),
            _ => None,
        }
    }
}

/// Job table shared by request handlers. Every job runs on a blocking thread
/// with its own allocator state; only this map is shared.
#[derive(Clone)]
pub struct InMemJobs<A: Allocate> {
    inner: Arc<RwLock<HashMap<String, JobStatus>>>,
    allocator: Arc<A>,
    default_grid: Grid,
}

impl<A: Allocate> InMemJobs<A> {
    pub fn new(allocator: A, default_grid: Grid) -> Self {
        Self {
            inner: Default::default(),
            allocator: Arc::new(allocator),
            default_grid,
        }
    }

    pub fn enqueue(&self, req: AllocationRequest) -> anyhow::Result<JobId> {
        let grid = match req.max_lectures {
            Some(n) => Grid::new(n)?,
            None => self.default_grid,
        };

        let id = Uuid::new_v4().to_string();
        self.inner.write().insert(id.clone(), JobStatus::Queued);

        let map = self.inner.clone();
        let allocator = self.allocator.clone();
        let id_for_task = id.clone();

        tokio::spawn(async move {
            map.write().insert(id_for_task.clone(), JobStatus::Running);
            let AllocationRequest {
                session_id,
                demands,
                ..
            } = req;
            let handle =
                tokio::task::spawn_blocking(move || allocator.allocate(&grid, &demands));
            let status = match handle.await {
                Ok(Ok(result)) => finished(&session_id, result),
                Ok(Err(e)) => {
                    error!(session = %session_id, error = %e, "allocation aborted");
                    JobStatus::Failed {
                        message: e.to_string(),
                    }
                }
                Err(e) => {
                    error!(session = %session_id, ?e, "allocation task failed");
                    JobStatus::Failed {
                        message: e.to_string(),
                    }
                }
            };
            map.write().insert(id_for_task, status);
        });

        Ok(JobId(id))
    }

    pub fn get(&self, id: &str) -> Option<JobStatus> {
        self.inner.read().get(id).cloned()
    }
}

fn finished(session: &SessionId, result: Allocation) -> JobStatus {
    info!(session = %session, summary = %result.summary(), "allocation job done");
    if result.is_complete() {
        JobStatus::Solved { result }
    } else {
        JobStatus::Partial { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocator::GreedyAllocator;
    use std::time::Duration;
    use timetable_core::TimetableError;
    use types::{ClassId, Demand, TeacherId, Weekday};

    /// Always aborts the way a broken occupancy invariant would.
    struct Conflicting;

    impl Allocate for Conflicting {
        fn allocate(&self, _: &Grid, _: &[Demand]) -> Result<Allocation, TimetableError> {
            Err(TimetableError::SlotConflict {
                day: Weekday::Tuesday,
                lecture: 2,
                teacher: TeacherId::new("t1"),
                class: ClassId::new("c1"),
            })
        }
    }

    async fn wait<A: Allocate>(jobs: &InMemJobs<A>, id: &JobId) -> JobStatus {
        for _ in 0..200 {
            match jobs.get(&id.0) {
                Some(JobStatus::Queued) | Some(JobStatus::Running) | None => {
                    tokio::time::sleep(Duration::from_millis(5)).await
                }
                Some(done) => return done,
            }
        }
        panic!("job {} did not finish", id.0);
    }

    fn request(demands: Vec<Demand>, max_lectures: Option<u8>) -> AllocationRequest {
        AllocationRequest {
            session_id: SessionId::new("2025-26"),
            demands,
            max_lectures,
        }
    }

    #[tokio::test]
    async fn complete_allocation_is_solved() {
        let jobs = InMemJobs::new(GreedyAllocator, Grid::default());
        let id = jobs
            .enqueue(request(vec![Demand::new("c1", "math", "t1", 2)], None))
            .unwrap();
        let status = wait(&jobs, &id).await;
        assert!(matches!(status, JobStatus::Solved { .. }));
        assert_eq!(status.result().unwrap().assignments.len(), 2);
    }

    #[tokio::test]
    async fn shortfall_is_partial_and_uses_the_requested_grid() {
        let jobs = InMemJobs::new(GreedyAllocator, Grid::default());
        let id = jobs
            .enqueue(request(vec![Demand::new("c1", "math", "t1", 8)], Some(1)))
            .unwrap();
        let result = match wait(&jobs, &id).await {
            JobStatus::Partial { result } => result,
            other => panic!("expected partial, got {other:?}"),
        };
        assert_eq!(result.stats.placed, 6);
        assert_eq!(result.unsatisfied_demands[0].missing, 2);
    }

    #[tokio::test]
    async fn aborted_run_ends_failed_with_the_error() {
        let jobs = InMemJobs::new(Conflicting, Grid::default());
        let id = jobs
            .enqueue(request(vec![Demand::new("c1", "math", "t1", 1)], None))
            .unwrap();
        match wait(&jobs, &id).await {
            JobStatus::Failed { message } => assert_eq!(
                message,
                "slot conflict at Tuesday lecture 2: teacher t1 or class c1 already busy"
            ),
            other => panic!("expected failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn zero_lecture_grid_is_refused_up_front() {
        let jobs = InMemJobs::new(GreedyAllocator, Grid::default());
        let err = jobs.enqueue(request(vec![], Some(0))).unwrap_err();
        assert!(err.to_string().contains("max_lectures=0"), "{err}");
    }

    #[test]
    fn unknown_job_is_none() {
        let jobs = InMemJobs::new(GreedyAllocator, Grid::default());
        assert!(jobs.get("nope").is_none());
    }
}
