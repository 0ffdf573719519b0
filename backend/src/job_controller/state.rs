//! Tracks background jobs dispatched outside the request/response cycle,
//! such as the asynchronous package-set sync started by
//! `POST /api/v1/package-sets/{slug}/async_sync`.
//!
//! - `JobsState`: clonable, shared map of job id to `JobStatus`, plus the
//!   sender workers report through. Injected into the app as `web::Data`.
//! - `JobUpdate`: one status change reported by a worker.
//! - `start_job_updater`: long-running task applying `JobUpdate`s to the map.

use common::jobs::JobStatus;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

const CHANNEL_CAPACITY: usize = 100;
/// Completed or failed jobs kept for polling; older ones are dropped first.
const FINISHED_JOBS_KEPT: usize = 1000;

#[derive(Clone)]
pub struct JobsState {
    /// Job id to its latest status. Read by `GET /api/v1/jobs/{id}`, written
    /// by `start_job_updater` and when a job is registered.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,
    /// Workers push progress here instead of locking `jobs` themselves.
    pub tx: mpsc::Sender<JobUpdate>,
}

#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobsState {
    /// Creates the shared state and the receiver `start_job_updater` consumes.
    pub fn new() -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let state = JobsState {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tx,
        };
        (state, rx)
    }

    /// Registers a new job as `Pending` and returns its id.
    pub async fn register(&self) -> String {
        let job_id = uuid::Uuid::new_v4().to_string();
        self.jobs
            .write()
            .await
            .insert(job_id.clone(), JobStatus::Pending);
        job_id
    }

    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.read().await.get(job_id).cloned()
    }
}

/// Applies every `JobUpdate` received on `rx` to the shared map.
/// Runs until all senders are dropped.
pub async fn start_job_updater(state: JobsState, rx: mpsc::Receiver<JobUpdate>) {
    apply_updates(state, rx, FINISHED_JOBS_KEPT).await;
}

async fn apply_updates(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>, keep_finished: usize) {
    let mut finished = VecDeque::new();
    while let Some(update) = rx.recv().await {
        let done = matches!(update.status, JobStatus::Completed(_) | JobStatus::Failed(_));
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id.clone(), update.status);
        if done {
            finished.push_back(update.job_id);
            while finished.len() > keep_finished {
                if let Some(oldest) = finished.pop_front() {
                    jobs.remove(&oldest);
                }
            }
        }
    }
}
