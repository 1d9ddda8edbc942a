// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assignment engine: moving jobs between triage, hold, and slots.
//!
//! Commands mutate a local board snapshot optimistically so callers see the
//! new arrangement immediately, then persist through the job store. On a
//! failed write the snapshot is reconciled from the store, which is the
//! system of record.
//!
//! Concurrent moves of the same job are not serialized here: the store's
//! update is last-writer-wins at the field level. Moves are human-triggered
//! and rare enough that true races are edge cases; this is a named caveat,
//! not a hidden one.

use crate::config::MessageTemplates;
use crate::notifier::message_vars;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rota_adapters::{JobStore, JobStoreError, MessageTransport, OutboundMessage, TemplateKind};
use rota_core::{
    lifecycle, Clock, Job, JobConfig, JobId, JobKind, JobPatch, JobStatus, LifecycleError, Shift,
    SlotKey, Transition, VehicleId,
};
use std::sync::Arc;
use thiserror::Error;

/// Where a job is being moved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    /// Back to the unscheduled pool.
    Triage,
    /// Parked until released; requires a non-empty reason.
    AwaitingRelease { reason: String },
    /// Into a `(date, vehicle, shift)` slot.
    Slot {
        date: NaiveDate,
        vehicle_id: VehicleId,
        shift: Shift,
    },
}

/// Errors from move commands
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("job not found: {0}")]
    JobNotFound(JobId),
    /// Lifecycle precondition failed; the job was not touched.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    /// Store write failed; the board was reconciled from the store and the
    /// command is safe to retry.
    #[error("persisting move: {0}")]
    Persistence(#[from] JobStoreError),
}

/// Outcome of a bulk day reschedule.
///
/// Failures are per-job and never abort the sweep.
#[derive(Debug, Clone, Default)]
pub struct RescheduleReport {
    /// Jobs returned to triage.
    pub rescheduled: Vec<JobId>,
    /// Jobs whose "sorry, rescheduling" notice went out.
    pub notified: Vec<JobId>,
    /// `(job, error)` pairs for failed writes or sends.
    pub failures: Vec<(JobId, String)>,
}

/// Slot assignment over an optimistic board snapshot.
#[derive(Clone)]
pub struct AssignmentEngine<S: JobStore, T: MessageTransport, C: Clock> {
    store: S,
    transport: T,
    clock: C,
    templates: MessageTemplates,
    board: Arc<Mutex<Vec<Job>>>,
}

impl<S: JobStore, T: MessageTransport, C: Clock> AssignmentEngine<S, T, C> {
    pub fn new(store: S, transport: T, clock: C, templates: MessageTemplates) -> Self {
        Self {
            store,
            transport,
            clock,
            templates,
            board: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reload the board snapshot from the job store.
    pub async fn refresh(&self) -> Result<(), JobStoreError> {
        let jobs = self.store.list(None).await?;
        *self.board.lock() = jobs;
        Ok(())
    }

    /// Cloned view of the board for slot-model queries.
    pub fn snapshot(&self) -> Vec<Job> {
        self.board.lock().clone()
    }

    /// Move a job to a destination.
    ///
    /// Re-issuing a move whose destination is already satisfied is an
    /// explicit no-op, which makes command-level retries idempotent.
    pub async fn move_job(&self, id: &JobId, destination: Destination) -> Result<Job, MoveError> {
        let current = self.find(id)?;
        if destination_satisfied(&current, &destination) {
            tracing::debug!(job_id = %id, "destination already satisfied; move is a no-op");
            return Ok(current);
        }
        let transition = match destination {
            Destination::Triage => Transition::Unassign,
            Destination::AwaitingRelease { reason } => Transition::Hold { reason },
            Destination::Slot { date, vehicle_id, shift } => {
                Transition::Assign { date, vehicle_id, shift }
            }
        };
        self.apply_and_persist(&current, transition).await
    }

    /// Return a held job to triage.
    pub async fn release(&self, id: &JobId) -> Result<Job, MoveError> {
        let current = self.find(id)?;
        self.apply_and_persist(&current, Transition::Release).await
    }

    /// Bulk reschedule: every scheduled job of `date` goes back to triage,
    /// with one "sorry, rescheduling" notice attempted per job.
    pub async fn reschedule_day(&self, date: NaiveDate) -> RescheduleReport {
        let targets: Vec<Job> = self
            .snapshot()
            .into_iter()
            .filter(|j| j.status == JobStatus::Scheduled && j.scheduled_date == Some(date))
            .collect();
        tracing::info!(%date, count = targets.len(), "bulk reschedule started");

        let mut report = RescheduleReport::default();
        for job in targets {
            // The notice announces the slot being cancelled, so capture it
            // before unassigning.
            let old_shift = job.shift;
            match self.apply_and_persist(&job, Transition::Unassign).await {
                Ok(_) => report.rescheduled.push(job.id.clone()),
                Err(e) => {
                    report.failures.push((job.id.clone(), e.to_string()));
                    continue;
                }
            }
            let message = self.reschedule_notice(&job, date, old_shift);
            match self.transport.send_single(&message).await {
                Ok(()) => report.notified.push(job.id.clone()),
                Err(e) => report.failures.push((job.id.clone(), e.to_string())),
            }
        }
        tracing::info!(
            rescheduled = report.rescheduled.len(),
            failures = report.failures.len(),
            "bulk reschedule finished"
        );
        report
    }

    /// Create a technical-assistance visit in triage.
    pub async fn create_assistance(&self, mut draft: JobConfig) -> Result<Job, MoveError> {
        draft.kind = JobKind::Assistance;
        let job = self.store.create(draft).await?;
        self.board.lock().push(job.clone());
        tracing::info!(job_id = %job.id, "assistance visit created");
        Ok(job)
    }

    async fn apply_and_persist(
        &self,
        current: &Job,
        transition: Transition,
    ) -> Result<Job, MoveError> {
        let trigger = transition.name();
        let mut updated = current.clone();
        lifecycle::apply(&mut updated, transition, self.clock.epoch_ms())?;

        // Optimistic: callers querying the board see the new arrangement
        // before the write lands.
        self.install(updated.clone());

        let patch = JobPatch::diff(current, &updated);
        match self.store.update(&current.id, patch).await {
            Ok(_) => {
                tracing::info!(job_id = %current.id, trigger, status = %updated.status, "job moved");
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(job_id = %current.id, trigger, error = %e, "move failed; reconciling board");
                self.reconcile().await;
                Err(MoveError::Persistence(e))
            }
        }
    }

    /// Best-effort board reconciliation from the store after a failed write.
    async fn reconcile(&self) {
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "board reconciliation failed; snapshot may be stale");
        }
    }

    fn find(&self, id: &JobId) -> Result<Job, MoveError> {
        self.board
            .lock()
            .iter()
            .find(|j| &j.id == id)
            .cloned()
            .ok_or_else(|| MoveError::JobNotFound(id.clone()))
    }

    fn install(&self, job: Job) {
        let mut board = self.board.lock();
        match board.iter_mut().find(|j| j.id == job.id) {
            Some(slot) => *slot = job,
            None => board.push(job),
        }
    }

    fn reschedule_notice(
        &self,
        job: &Job,
        date: NaiveDate,
        shift: Option<Shift>,
    ) -> OutboundMessage {
        let vars = message_vars(job, date, shift);
        OutboundMessage {
            job_id: job.id.clone(),
            channel_address: job.customer_phone.clone(),
            template: TemplateKind::Rescheduled,
            body: crate::config::interpolate(&self.templates.rescheduled, &vars),
        }
    }
}

fn destination_satisfied(job: &Job, destination: &Destination) -> bool {
    match destination {
        Destination::Triage => {
            job.status == JobStatus::Pending
                && job.scheduled_date.is_none()
                && job.vehicle_id.is_none()
        }
        Destination::AwaitingRelease { reason } => {
            job.status == JobStatus::AwaitingRelease
                && job.hold_reason.as_deref() == Some(reason.as_str())
        }
        Destination::Slot { date, vehicle_id, shift } => {
            job.status == JobStatus::Scheduled
                && job.in_slot(&SlotKey {
                    date: *date,
                    vehicle_id: vehicle_id.clone(),
                    shift: *shift,
                })
        }
    }
}

#[cfg(test)]
#[path = "assignment_tests.rs"]
mod tests;
