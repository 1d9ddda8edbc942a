// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vehicle store boundary.
//!
//! Fleet CRUD is external; the engine only needs read + partial update so
//! the execution tracker can flip route status and report positions.

use async_trait::async_trait;
use rota_core::{Vehicle, VehicleId, VehiclePatch};
use thiserror::Error;

/// Errors from vehicle store operations
#[derive(Debug, Clone, Error)]
pub enum VehicleStoreError {
    #[error("vehicle not found: {0}")]
    NotFound(VehicleId),
    #[error("vehicle store backend: {0}")]
    Backend(String),
}

/// Read + partial update access to vehicle records.
#[async_trait]
pub trait VehicleStore: Clone + Send + Sync + 'static {
    async fn get(&self, id: &VehicleId) -> Result<Vehicle, VehicleStoreError>;

    async fn update(
        &self,
        id: &VehicleId,
        patch: VehiclePatch,
    ) -> Result<Vehicle, VehicleStoreError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{VehicleStore, VehicleStoreError};
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use parking_lot::Mutex;
    use rota_core::{Vehicle, VehicleId, VehiclePatch};
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeVehicleStoreState {
        vehicles: IndexMap<VehicleId, Vehicle>,
        update_calls: Vec<(VehicleId, VehiclePatch)>,
        fail_next_update: bool,
    }

    /// In-memory vehicle store for testing.
    #[derive(Clone, Default)]
    pub struct FakeVehicleStore {
        inner: Arc<Mutex<FakeVehicleStoreState>>,
    }

    impl FakeVehicleStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, vehicle: Vehicle) {
            self.inner.lock().vehicles.insert(vehicle.id.clone(), vehicle);
        }

        /// Stored record, panics if absent.
        pub fn vehicle(&self, id: &VehicleId) -> Vehicle {
            self.inner.lock().vehicles[id].clone()
        }

        pub fn update_calls(&self) -> Vec<(VehicleId, VehiclePatch)> {
            self.inner.lock().update_calls.clone()
        }

        pub fn fail_next_update(&self) {
            self.inner.lock().fail_next_update = true;
        }
    }

    #[async_trait]
    impl VehicleStore for FakeVehicleStore {
        async fn get(&self, id: &VehicleId) -> Result<Vehicle, VehicleStoreError> {
            self.inner
                .lock()
                .vehicles
                .get(id)
                .cloned()
                .ok_or_else(|| VehicleStoreError::NotFound(id.clone()))
        }

        async fn update(
            &self,
            id: &VehicleId,
            patch: VehiclePatch,
        ) -> Result<Vehicle, VehicleStoreError> {
            let mut state = self.inner.lock();
            state.update_calls.push((id.clone(), patch.clone()));
            if state.fail_next_update {
                state.fail_next_update = false;
                return Err(VehicleStoreError::Backend("update unavailable".to_string()));
            }
            let vehicle = state
                .vehicles
                .get_mut(id)
                .ok_or_else(|| VehicleStoreError::NotFound(id.clone()))?;
            patch.apply(vehicle);
            Ok(vehicle.clone())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeVehicleStore;

#[cfg(test)]
#[path = "vehicle_store_tests.rs"]
mod tests;
