// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slot model: pure projections over a job snapshot.
//!
//! The job store is the system of record; every query here recomputes its
//! answer from the snapshot it is handed. Nothing is cached between calls,
//! so the projection can never drift from the store.

use crate::job::{Job, JobStatus, Shift};
use crate::vehicle::VehicleId;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The `(date, vehicle, shift)` triple a job can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub vehicle_id: VehicleId,
    pub shift: Shift,
}

/// Jobs assigned to one slot, ordered by `route_order` ascending with
/// unordered jobs last in snapshot order.
pub fn jobs_in<'a>(jobs: &'a [Job], key: &SlotKey) -> Vec<&'a Job> {
    let mut members: Vec<&Job> = jobs.iter().filter(|j| j.in_slot(key)).collect();
    // Stable sort keeps snapshot order among ties and among the unordered
    // tail.
    members.sort_by_key(|j| (j.route_order.is_none(), j.route_order));
    members
}

/// Jobs waiting for a slot: no date or no vehicle, not held, not terminal.
pub fn triage(jobs: &[Job]) -> Vec<&Job> {
    jobs.iter()
        .filter(|j| {
            (j.scheduled_date.is_none() || j.vehicle_id.is_none())
                && j.status != JobStatus::AwaitingRelease
                && !j.is_terminal()
        })
        .collect()
}

/// Jobs parked with a hold reason.
pub fn held(jobs: &[Job]) -> Vec<&Job> {
    jobs.iter().filter(|j| j.status == JobStatus::AwaitingRelease).collect()
}

/// The full board for one day: every `(vehicle, shift)` column with its
/// ordered stops, columns in first-seen snapshot order.
pub fn board(jobs: &[Job], date: NaiveDate) -> IndexMap<(VehicleId, Shift), Vec<&Job>> {
    let mut columns: IndexMap<(VehicleId, Shift), Vec<&Job>> = IndexMap::new();
    for job in jobs {
        if job.scheduled_date != Some(date) {
            continue;
        }
        if let (Some(vehicle_id), Some(shift)) = (&job.vehicle_id, job.shift) {
            columns.entry((vehicle_id.clone(), shift)).or_default().push(job);
        }
    }
    for stops in columns.values_mut() {
        stops.sort_by_key(|j| (j.route_order.is_none(), j.route_order));
    }
    columns
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;
