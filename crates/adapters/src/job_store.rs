// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job store boundary.
//!
//! The store is the system of record for jobs. Updates are partial
//! ([`JobPatch`]) and last-writer-wins at the field level; there is no
//! cross-record transaction.

use async_trait::async_trait;
use rota_core::{Job, JobConfig, JobId, JobKind, JobPatch};
use thiserror::Error;

/// Errors from job store operations
#[derive(Debug, Clone, Error)]
pub enum JobStoreError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("job store backend: {0}")]
    Backend(String),
}

/// CRUD + list access to job records.
#[async_trait]
pub trait JobStore: Clone + Send + Sync + 'static {
    /// List jobs, optionally filtered by kind.
    async fn list(&self, kind: Option<JobKind>) -> Result<Vec<Job>, JobStoreError>;

    async fn get(&self, id: &JobId) -> Result<Job, JobStoreError>;

    /// Apply a partial update and return the stored record.
    async fn update(&self, id: &JobId, patch: JobPatch) -> Result<Job, JobStoreError>;

    /// Create a new job in triage from a draft.
    async fn create(&self, draft: JobConfig) -> Result<Job, JobStoreError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{JobStore, JobStoreError};
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use parking_lot::Mutex;
    use rota_core::{Job, JobConfig, JobId, JobKind, JobPatch};
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeJobStoreState {
        jobs: IndexMap<JobId, Job>,
        update_calls: Vec<(JobId, JobPatch)>,
        /// Updates remaining before one injected failure.
        fail_updates_after: Option<usize>,
        fail_next_list: bool,
    }

    /// In-memory job store for testing, with injectable failures.
    #[derive(Clone, Default)]
    pub struct FakeJobStore {
        inner: Arc<Mutex<FakeJobStoreState>>,
    }

    impl FakeJobStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, job: Job) {
            self.inner.lock().jobs.insert(job.id.clone(), job);
        }

        /// Stored record, panics if absent.
        pub fn job(&self, id: &JobId) -> Job {
            self.inner.lock().jobs[id].clone()
        }

        pub fn update_calls(&self) -> Vec<(JobId, JobPatch)> {
            self.inner.lock().update_calls.clone()
        }

        /// Fail the next update call; later updates succeed again.
        pub fn fail_next_update(&self) {
            self.inner.lock().fail_updates_after = Some(0);
        }

        /// Let `n` updates succeed, fail the one after, then recover.
        pub fn fail_updates_after(&self, n: usize) {
            self.inner.lock().fail_updates_after = Some(n);
        }

        pub fn fail_next_list(&self) {
            self.inner.lock().fail_next_list = true;
        }
    }

    #[async_trait]
    impl JobStore for FakeJobStore {
        async fn list(&self, kind: Option<JobKind>) -> Result<Vec<Job>, JobStoreError> {
            let mut state = self.inner.lock();
            if state.fail_next_list {
                state.fail_next_list = false;
                return Err(JobStoreError::Backend("list unavailable".to_string()));
            }
            Ok(state
                .jobs
                .values()
                .filter(|j| kind.is_none_or(|k| j.kind == k))
                .cloned()
                .collect())
        }

        async fn get(&self, id: &JobId) -> Result<Job, JobStoreError> {
            self.inner
                .lock()
                .jobs
                .get(id)
                .cloned()
                .ok_or_else(|| JobStoreError::NotFound(id.clone()))
        }

        async fn update(&self, id: &JobId, patch: JobPatch) -> Result<Job, JobStoreError> {
            let mut state = self.inner.lock();
            state.update_calls.push((id.clone(), patch.clone()));
            if let Some(remaining) = state.fail_updates_after {
                if remaining == 0 {
                    state.fail_updates_after = None;
                    return Err(JobStoreError::Backend("update unavailable".to_string()));
                }
                state.fail_updates_after = Some(remaining - 1);
            }
            let job = state
                .jobs
                .get_mut(id)
                .ok_or_else(|| JobStoreError::NotFound(id.clone()))?;
            patch.apply(job);
            Ok(job.clone())
        }

        async fn create(&self, draft: JobConfig) -> Result<Job, JobStoreError> {
            let job = Job::new(draft);
            self.inner.lock().jobs.insert(job.id.clone(), job.clone());
            Ok(job)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeJobStore;

#[cfg(test)]
#[path = "job_store_tests.rs"]
mod tests;
