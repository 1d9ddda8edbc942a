// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution tracker: the driver-facing side of a route.
//!
//! While a route is active a background task reports the vehicle's position
//! at a fixed interval; a failed position read skips that tick and retries
//! on the next. The task is bound to a cancellation token held by the
//! [`RouteHandle`], so stopping the route stops the reporting.
//!
//! The loop only ever touches the Vehicle record, never Jobs, so it cannot
//! race assignment-engine mutations.

use rota_adapters::{
    JobStore, JobStoreError, LocationProvider, VehicleStore, VehicleStoreError,
};
use rota_core::{
    lifecycle, Clock, Job, JobId, JobPatch, LifecycleError, Patch, ProofOfDelivery, RouteStatus,
    Shift, Transition, VehicleId, VehiclePatch,
};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Errors from execution tracking
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("vehicle {0} already has an active route")]
    AlreadyActive(VehicleId),
    #[error(transparent)]
    Vehicle(#[from] VehicleStoreError),
    #[error(transparent)]
    Store(#[from] JobStoreError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Handle to an active route's position-reporting task.
///
/// Pass it back to [`ExecutionTracker::stop_route`] to end the route.
#[derive(Debug)]
pub struct RouteHandle {
    vehicle_id: VehicleId,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl RouteHandle {
    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }
}

/// Drives jobs through execution while a vehicle's route is active.
#[derive(Clone)]
pub struct ExecutionTracker<V, L, S, C>
where
    V: VehicleStore,
    L: LocationProvider,
    S: JobStore,
    C: Clock + 'static,
{
    vehicles: V,
    location: L,
    store: S,
    clock: C,
    interval: Duration,
}

impl<V, L, S, C> ExecutionTracker<V, L, S, C>
where
    V: VehicleStore,
    L: LocationProvider,
    S: JobStore,
    C: Clock + 'static,
{
    pub fn new(vehicles: V, location: L, store: S, clock: C, interval: Duration) -> Self {
        Self { vehicles, location, store, clock, interval }
    }

    /// Mark the vehicle in transit and start the position-reporting loop.
    pub async fn start_route(
        &self,
        vehicle_id: &VehicleId,
        driver: &str,
        shift: Shift,
    ) -> Result<RouteHandle, TrackerError> {
        let vehicle = self.vehicles.get(vehicle_id).await?;
        if vehicle.route_status == RouteStatus::InTransit {
            return Err(TrackerError::AlreadyActive(vehicle_id.clone()));
        }

        let patch = VehiclePatch {
            route_status: Some(RouteStatus::InTransit),
            active_driver: Patch::Set(driver.to_string()),
            active_shift: Patch::Set(shift),
            ..VehiclePatch::default()
        };
        self.vehicles.update(vehicle_id, patch).await?;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(position_loop(
            self.vehicles.clone(),
            self.location.clone(),
            self.clock.clone(),
            vehicle_id.clone(),
            self.interval,
            cancel.clone(),
        ));
        tracing::info!(%vehicle_id, driver, %shift, "route started");
        Ok(RouteHandle { vehicle_id: vehicle_id.clone(), cancel, task })
    }

    /// End the route: stop the reporting loop and reset the vehicle to idle.
    ///
    /// The last known position stays on the record.
    pub async fn stop_route(&self, handle: RouteHandle) -> Result<(), TrackerError> {
        handle.cancel.cancel();
        let _ = handle.task.await;

        let patch = VehiclePatch {
            route_status: Some(RouteStatus::Idle),
            active_driver: Patch::Clear,
            active_shift: Patch::Clear,
            ..VehiclePatch::default()
        };
        self.vehicles.update(&handle.vehicle_id, patch).await?;
        tracing::info!(vehicle_id = %handle.vehicle_id, "route stopped");
        Ok(())
    }

    /// Complete a job with proof of delivery.
    pub async fn mark_delivered(
        &self,
        id: &JobId,
        proof: ProofOfDelivery,
    ) -> Result<Job, TrackerError> {
        self.transition_job(id, Transition::MarkDelivered { proof }).await
    }

    /// Record a failed attempt; the job goes back to triage.
    pub async fn mark_failed_attempt(
        &self,
        id: &JobId,
        photo_ref: &str,
        reason: &str,
    ) -> Result<Job, TrackerError> {
        self.transition_job(
            id,
            Transition::FailAttempt {
                photo_ref: photo_ref.to_string(),
                reason: reason.to_string(),
            },
        )
        .await
    }

    async fn transition_job(&self, id: &JobId, transition: Transition) -> Result<Job, TrackerError> {
        let trigger = transition.name();
        let current = self.store.get(id).await?;
        let mut updated = current.clone();
        lifecycle::apply(&mut updated, transition, self.clock.epoch_ms())?;

        let patch = JobPatch::diff(&current, &updated);
        let stored = self.store.update(id, patch).await?;
        tracing::info!(job_id = %id, trigger, status = %stored.status, "job advanced");
        Ok(stored)
    }
}

/// Periodic position reporting for one vehicle.
///
/// Runs until cancelled. Each tick reads the location provider and patches
/// the vehicle's coordinates; a failed read or write skips the tick.
async fn position_loop<V, L, C>(
    vehicles: V,
    location: L,
    clock: C,
    vehicle_id: VehicleId,
    interval: Duration,
    cancel: CancellationToken,
) where
    V: VehicleStore,
    L: LocationProvider,
    C: Clock,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {
                match location.read_position().await {
                    Ok(position) => {
                        let patch = VehiclePatch {
                            latitude: Patch::Set(position.latitude),
                            longitude: Patch::Set(position.longitude),
                            last_update_ms: Patch::Set(clock.epoch_ms()),
                            ..VehiclePatch::default()
                        };
                        if let Err(e) = vehicles.update(&vehicle_id, patch).await {
                            tracing::warn!(%vehicle_id, error = %e, "position write failed");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(%vehicle_id, error = %e, "position read failed; skipping tick");
                    }
                }
            }
        }
    }
    tracing::debug!(%vehicle_id, "position loop stopped");
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
