// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rota_core::{Patch, RouteStatus, Vehicle};

#[tokio::test]
async fn get_returns_inserted_vehicle() {
    let store = FakeVehicleStore::new();
    let vehicle = Vehicle::builder().id("veh-7").build();
    store.insert(vehicle.clone());

    assert_eq!(store.get(&"veh-7".into()).await.unwrap(), vehicle);
}

#[tokio::test]
async fn get_unknown_vehicle_is_not_found() {
    let store = FakeVehicleStore::new();
    let err = store.get(&"veh-missing".into()).await.unwrap_err();
    assert!(matches!(err, VehicleStoreError::NotFound(_)));
}

#[tokio::test]
async fn update_applies_partial_patch() {
    let store = FakeVehicleStore::new();
    store.insert(Vehicle::builder().id("veh-7").build());

    let patch = VehiclePatch {
        route_status: Some(RouteStatus::InTransit),
        active_driver: Patch::Set("Carlos".to_string()),
        ..VehiclePatch::default()
    };
    let updated = store.update(&"veh-7".into(), patch).await.unwrap();

    assert_eq!(updated.route_status, RouteStatus::InTransit);
    assert_eq!(updated.active_driver.as_deref(), Some("Carlos"));
    assert_eq!(store.update_calls().len(), 1);
}

#[tokio::test]
async fn injected_failure_leaves_record_untouched() {
    let store = FakeVehicleStore::new();
    store.insert(Vehicle::builder().id("veh-7").build());
    store.fail_next_update();

    let patch =
        VehiclePatch { route_status: Some(RouteStatus::InTransit), ..VehiclePatch::default() };
    let err = store.update(&"veh-7".into(), patch).await.unwrap_err();
    assert!(matches!(err, VehicleStoreError::Backend(_)));
    assert_eq!(store.vehicle(&"veh-7".into()).route_status, RouteStatus::Idle);
}
