// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch notifier: who is owed a customer notification, and sending it.
//!
//! The dedup key is exactly `(scheduled_date, shift)`. Editing either field
//! makes the last confirmed send stale, so the job shows up as owed again
//! with no explicit reset step. Sends go out as one batch; the transport
//! only reports whole-batch success or failure, so on failure nothing is
//! marked sent and the caller retries the whole owed set.

use crate::config::{interpolate, MessageTemplates};
use chrono::NaiveDate;
use indexmap::IndexMap;
use rota_adapters::{
    JobStore, JobStoreError, MessageTransport, OutboundMessage, TemplateKind, TransportError,
};
use rota_core::{Job, JobPatch, Patch, Shift, VehicleId};
use std::collections::HashMap;
use thiserror::Error;

/// Partition of a job set by the owed-notification invariant.
#[derive(Debug, Clone, Default)]
pub struct NotificationSplit {
    pub owed: Vec<Job>,
    pub already_sent: Vec<Job>,
}

/// Split `jobs` into owed and already-notified.
///
/// Pure partition; terminal jobs are never owed.
pub fn pending_for(jobs: &[Job]) -> NotificationSplit {
    let mut split = NotificationSplit::default();
    for job in jobs {
        if job.owes_notification() {
            split.owed.push(job.clone());
        } else if !job.is_terminal() {
            split.already_sent.push(job.clone());
        }
    }
    split
}

/// Owed jobs grouped by vehicle for report/UI purposes, columns in
/// first-seen order. Triage jobs group under `None`.
pub fn owed_by_vehicle(jobs: &[Job]) -> IndexMap<Option<VehicleId>, Vec<Job>> {
    let mut groups: IndexMap<Option<VehicleId>, Vec<Job>> = IndexMap::new();
    for job in jobs {
        if job.owes_notification() {
            groups.entry(job.vehicle_id.clone()).or_default().push(job.clone());
        }
    }
    groups
}

/// Errors from notification dispatch
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No owed job had a (date, shift) to announce.
    #[error("no notifications to send")]
    NothingToSend,
    /// The batch send failed; nothing was marked sent, safe to retry.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Marking a job notified failed after the batch went out.
    #[error("recording notification sent: {0}")]
    Store(#[from] JobStoreError),
}

/// Sends owed notifications and records the dedup pair.
#[derive(Clone)]
pub struct DispatchNotifier<S: JobStore, T: MessageTransport> {
    store: S,
    transport: T,
    templates: MessageTemplates,
}

impl<S: JobStore, T: MessageTransport> DispatchNotifier<S, T> {
    pub fn new(store: S, transport: T, templates: MessageTemplates) -> Self {
        Self { store, transport, templates }
    }

    /// Send one reminder per owed job in a single batch, then record the
    /// (date, shift) pair on each.
    ///
    /// Jobs missing a date or shift are skipped with a warning. On transport
    /// failure NONE are marked sent and the error is retryable. Returns the
    /// number of jobs marked.
    pub async fn dispatch(&self, owed: &[Job]) -> Result<usize, DispatchError> {
        let mut sendable: Vec<(&Job, NaiveDate, Shift)> = Vec::new();
        for job in owed {
            match (job.scheduled_date, job.shift) {
                (Some(date), Some(shift)) => sendable.push((job, date, shift)),
                _ => {
                    tracing::warn!(job_id = %job.id, "owed job has no date/shift; skipping");
                }
            }
        }
        if sendable.is_empty() {
            return Err(DispatchError::NothingToSend);
        }

        let messages: Vec<OutboundMessage> = sendable
            .iter()
            .map(|(job, date, shift)| self.reminder(job, *date, *shift))
            .collect();
        self.transport.send_batch(&messages).await?;

        let mut marked = 0;
        for (job, date, shift) in &sendable {
            self.mark_sent(job, *date, *shift).await?;
            marked += 1;
        }
        tracing::info!(count = marked, "notification batch dispatched");
        Ok(marked)
    }

    /// Record the dedup pair on the stored job. Called only after the
    /// transport confirmed the send, never speculatively.
    pub async fn mark_sent(
        &self,
        job: &Job,
        as_of_date: NaiveDate,
        as_of_shift: Shift,
    ) -> Result<Job, JobStoreError> {
        let patch = JobPatch {
            notification_sent_date: Patch::Set(as_of_date),
            notification_sent_shift: Patch::Set(as_of_shift),
            ..JobPatch::default()
        };
        self.store.update(&job.id, patch).await
    }

    fn reminder(&self, job: &Job, date: NaiveDate, shift: Shift) -> OutboundMessage {
        let vars = message_vars(job, date, Some(shift));
        OutboundMessage {
            job_id: job.id.clone(),
            channel_address: job.customer_phone.clone(),
            template: TemplateKind::ScheduledReminder,
            body: interpolate(&self.templates.scheduled, &vars),
        }
    }
}

/// Template variables shared by reminder and reschedule messages.
pub(crate) fn message_vars(
    job: &Job,
    date: NaiveDate,
    shift: Option<Shift>,
) -> HashMap<String, String> {
    HashMap::from([
        ("customer".to_string(), job.customer_name.clone()),
        ("kind".to_string(), job.kind.to_string()),
        ("order".to_string(), job.order_number.clone()),
        ("date".to_string(), date.format("%Y-%m-%d").to_string()),
        ("shift".to_string(), shift.map(|s| s.to_string()).unwrap_or_default()),
    ])
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
