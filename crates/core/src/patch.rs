// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed partial updates for store writes.
//!
//! The external stores update one record at a time with field-level
//! last-writer-wins semantics. [`JobPatch`] and [`VehiclePatch`] make those
//! partial writes typed: every field is either kept, set, or cleared, and a
//! patch can be derived as the diff between two entity snapshots.

use crate::job::{AttemptRecord, Job, JobStatus, ProofOfDelivery, Shift};
use crate::vehicle::{RouteStatus, Vehicle};
use crate::VehicleId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One optional field of a partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Patch<T> {
    /// Leave the stored value untouched.
    Keep,
    Set(T),
    Clear,
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T: Clone> Patch<T> {
    pub fn apply_to(&self, field: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Set(v) => *field = Some(v.clone()),
            Patch::Clear => *field = None,
        }
    }
}

fn diff_opt<T: Clone + PartialEq>(before: &Option<T>, after: &Option<T>) -> Patch<T> {
    if before == after {
        return Patch::Keep;
    }
    match after {
        Some(v) => Patch::Set(v.clone()),
        None => Patch::Clear,
    }
}

/// Partial update for a [`Job`] record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub scheduled_date: Patch<NaiveDate>,
    #[serde(default)]
    pub shift: Patch<Shift>,
    #[serde(default)]
    pub vehicle_id: Patch<VehicleId>,
    #[serde(default)]
    pub route_order: Patch<u32>,
    #[serde(default)]
    pub notification_sent_date: Patch<NaiveDate>,
    #[serde(default)]
    pub notification_sent_shift: Patch<Shift>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_log: Option<Vec<AttemptRecord>>,
    #[serde(default)]
    pub hold_reason: Patch<String>,
    #[serde(default)]
    pub proof: Patch<ProofOfDelivery>,
}

impl JobPatch {
    /// Field-level diff of two job snapshots.
    ///
    /// Identity fields (id, kind, customer data) are never patched; the
    /// lifecycle does not touch them.
    pub fn diff(before: &Job, after: &Job) -> Self {
        Self {
            status: (before.status != after.status).then_some(after.status),
            scheduled_date: diff_opt(&before.scheduled_date, &after.scheduled_date),
            shift: diff_opt(&before.shift, &after.shift),
            vehicle_id: diff_opt(&before.vehicle_id, &after.vehicle_id),
            route_order: diff_opt(&before.route_order, &after.route_order),
            notification_sent_date: diff_opt(
                &before.notification_sent_date,
                &after.notification_sent_date,
            ),
            notification_sent_shift: diff_opt(
                &before.notification_sent_shift,
                &after.notification_sent_shift,
            ),
            attempt_count: (before.attempt_count != after.attempt_count)
                .then_some(after.attempt_count),
            attempt_log: (before.attempt_log != after.attempt_log)
                .then(|| after.attempt_log.clone()),
            hold_reason: diff_opt(&before.hold_reason, &after.hold_reason),
            proof: diff_opt(&before.proof, &after.proof),
        }
    }

    pub fn apply(&self, job: &mut Job) {
        if let Some(status) = self.status {
            job.status = status;
        }
        self.scheduled_date.apply_to(&mut job.scheduled_date);
        self.shift.apply_to(&mut job.shift);
        self.vehicle_id.apply_to(&mut job.vehicle_id);
        self.route_order.apply_to(&mut job.route_order);
        self.notification_sent_date.apply_to(&mut job.notification_sent_date);
        self.notification_sent_shift.apply_to(&mut job.notification_sent_shift);
        if let Some(count) = self.attempt_count {
            job.attempt_count = count;
        }
        if let Some(log) = &self.attempt_log {
            job.attempt_log = log.clone();
        }
        self.hold_reason.apply_to(&mut job.hold_reason);
        self.proof.apply_to(&mut job.proof);
    }
}

/// Partial update for a [`Vehicle`] record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehiclePatch {
    #[serde(default)]
    pub latitude: Patch<f64>,
    #[serde(default)]
    pub longitude: Patch<f64>,
    #[serde(default)]
    pub last_update_ms: Patch<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_status: Option<RouteStatus>,
    #[serde(default)]
    pub active_driver: Patch<String>,
    #[serde(default)]
    pub active_shift: Patch<Shift>,
}

impl VehiclePatch {
    pub fn apply(&self, vehicle: &mut Vehicle) {
        self.latitude.apply_to(&mut vehicle.latitude);
        self.longitude.apply_to(&mut vehicle.longitude);
        self.last_update_ms.apply_to(&mut vehicle.last_update_ms);
        if let Some(status) = self.route_status {
            vehicle.route_status = status;
        }
        self.active_driver.apply_to(&mut vehicle.active_driver);
        self.active_shift.apply_to(&mut vehicle.active_shift);
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
