// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job lifecycle state machine.
//!
//! Pure state-to-state logic: no I/O, no persistence. Callers (assignment
//! engine, execution tracker) persist the mutated job and run notification
//! side effects themselves.
//!
//! All preconditions are validated before any field is touched, so a failed
//! transition leaves the job exactly as it was.

use crate::job::{AttemptRecord, Job, JobStatus, ProofOfDelivery, Shift};
use crate::vehicle::VehicleId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A requested lifecycle change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Place the job into a slot (from triage or from another slot).
    Assign {
        date: NaiveDate,
        vehicle_id: VehicleId,
        shift: Shift,
    },
    /// Drop the job back to triage.
    Unassign,
    /// Park the job until released; requires a non-empty reason.
    Hold { reason: String },
    /// Return a held job to triage.
    Release,
    /// Complete the job with proof.
    MarkDelivered { proof: ProofOfDelivery },
    /// Record a failed delivery attempt and drop the job back to triage.
    FailAttempt { photo_ref: String, reason: String },
    /// Call the job off.
    Cancel,
}

impl Transition {
    /// Trigger name for error reporting and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Transition::Assign { .. } => "assign",
            Transition::Unassign => "unassign",
            Transition::Hold { .. } => "hold",
            Transition::Release => "release",
            Transition::MarkDelivered { .. } => "mark_delivered",
            Transition::FailAttempt { .. } => "fail_attempt",
            Transition::Cancel => "cancel",
        }
    }
}

/// Why a transition was rejected.
///
/// `InvalidTransition` means the job is in the wrong source state; the
/// remaining variants are validation failures (missing proof or reason).
/// None of them are retryable as-is: the caller must supply the missing data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("cannot {trigger} a {from} job")]
    InvalidTransition { from: JobStatus, trigger: &'static str },
    #[error("delivery proof requires a customer signature")]
    MissingSignature,
    #[error("a photo is required")]
    MissingPhoto,
    #[error("a non-empty reason is required")]
    MissingReason,
    #[error("payment is due on this job and no payment proof was captured")]
    PaymentProofRequired,
}

/// Apply a transition to a job.
///
/// Validates every precondition before mutating; on error the job is
/// untouched. `epoch_ms` stamps attempt records and proof completion.
pub fn apply(job: &mut Job, transition: Transition, epoch_ms: u64) -> Result<(), LifecycleError> {
    let trigger = transition.name();
    if job.status.is_terminal() {
        return Err(LifecycleError::InvalidTransition { from: job.status, trigger });
    }

    match transition {
        Transition::Assign { date, vehicle_id, shift } => {
            require_status(job, &[JobStatus::Pending, JobStatus::Scheduled], trigger)?;
            job.scheduled_date = Some(date);
            job.vehicle_id = Some(vehicle_id);
            job.shift = Some(shift);
            // A fresh slot starts unordered; sequencing is the route
            // optimizer's job.
            job.route_order = None;
            job.status = JobStatus::Scheduled;
        }
        Transition::Unassign => {
            require_status(job, &[JobStatus::Scheduled], trigger)?;
            clear_slot(job);
            job.status = JobStatus::Pending;
        }
        Transition::Hold { reason } => {
            require_status(job, &[JobStatus::Pending, JobStatus::Scheduled], trigger)?;
            let reason = non_empty(reason)?;
            clear_slot(job);
            job.hold_reason = Some(reason);
            job.status = JobStatus::AwaitingRelease;
        }
        Transition::Release => {
            require_status(job, &[JobStatus::AwaitingRelease], trigger)?;
            job.hold_reason = None;
            job.status = JobStatus::Pending;
        }
        Transition::MarkDelivered { mut proof } => {
            require_status(job, &[JobStatus::Scheduled], trigger)?;
            if proof.signature_ref.trim().is_empty() {
                return Err(LifecycleError::MissingSignature);
            }
            if proof.photo_refs.iter().all(|p| p.trim().is_empty()) {
                return Err(LifecycleError::MissingPhoto);
            }
            if payment_proof_missing(job, &proof) {
                return Err(LifecycleError::PaymentProofRequired);
            }
            proof.completed_at_ms = epoch_ms;
            job.proof = Some(proof);
            job.status = JobStatus::Delivered;
        }
        Transition::FailAttempt { photo_ref, reason } => {
            require_status(job, &[JobStatus::Scheduled], trigger)?;
            if photo_ref.trim().is_empty() {
                return Err(LifecycleError::MissingPhoto);
            }
            let reason = non_empty(reason)?;
            job.attempt_count += 1;
            job.attempt_log.push(AttemptRecord {
                photo_ref,
                reason,
                recorded_at_ms: epoch_ms,
            });
            clear_slot(job);
            job.status = JobStatus::Pending;
        }
        Transition::Cancel => {
            job.status = JobStatus::Cancelled;
        }
    }
    Ok(())
}

fn require_status(
    job: &Job,
    allowed: &[JobStatus],
    trigger: &'static str,
) -> Result<(), LifecycleError> {
    if allowed.contains(&job.status) {
        Ok(())
    } else {
        Err(LifecycleError::InvalidTransition { from: job.status, trigger })
    }
}

fn non_empty(reason: String) -> Result<String, LifecycleError> {
    if reason.trim().is_empty() {
        Err(LifecycleError::MissingReason)
    } else {
        Ok(reason)
    }
}

fn clear_slot(job: &mut Job) {
    job.scheduled_date = None;
    job.vehicle_id = None;
    job.shift = None;
    job.route_order = None;
}

/// Payment proof is required iff an amount is actually due and the proof
/// bundle does not carry a receipt.
fn payment_proof_missing(job: &Job, proof: &ProofOfDelivery) -> bool {
    match &job.payment_due {
        Some(due) => due.amount_cents > 0 && proof.payment_proof_ref.is_none(),
        None => false,
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
