// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixture for scenario specs: every engine wired to the same fakes.

pub use chrono::NaiveDate;
pub use rota_adapters::{
    FakeJobStore, FakeLocationProvider, FakeRoutingProvider, FakeTransport, FakeVehicleStore,
    TemplateKind,
};
pub use rota_core::test_support::{cash_due, date, scheduled_job, valid_proof};
pub use rota_core::{
    slot, FakeClock, Job, JobBuilder, JobStatus, Shift, SlotKey, Vehicle, VehicleId,
};
pub use rota_engine::{
    pending_for, AssignmentEngine, Destination, DispatchNotifier, ExecutionTracker,
    MessageTemplates, RouteOptimizer,
};
pub use std::time::Duration;

pub struct World {
    pub store: FakeJobStore,
    pub vehicles: FakeVehicleStore,
    pub transport: FakeTransport,
    pub routing: FakeRoutingProvider,
    pub location: FakeLocationProvider,
    pub clock: FakeClock,
    pub engine: AssignmentEngine<FakeJobStore, FakeTransport, FakeClock>,
    pub notifier: DispatchNotifier<FakeJobStore, FakeTransport>,
    pub optimizer: RouteOptimizer<FakeRoutingProvider, FakeJobStore>,
    pub tracker:
        ExecutionTracker<FakeVehicleStore, FakeLocationProvider, FakeJobStore, FakeClock>,
}

/// Wire every engine to one set of fakes, with `jobs` preloaded.
pub async fn world(jobs: Vec<Job>) -> World {
    let store = FakeJobStore::new();
    for job in jobs {
        store.insert(job);
    }
    let vehicles = FakeVehicleStore::new();
    vehicles.insert(Vehicle::builder().id("veh-7").build());
    let transport = FakeTransport::new();
    let routing = FakeRoutingProvider::new();
    let location = FakeLocationProvider::new();
    let clock = FakeClock::new();
    let templates = MessageTemplates::default();

    let engine =
        AssignmentEngine::new(store.clone(), transport.clone(), clock.clone(), templates.clone());
    engine.refresh().await.expect("fake store list cannot fail");
    let notifier = DispatchNotifier::new(store.clone(), transport.clone(), templates);
    let optimizer = RouteOptimizer::new(routing.clone(), store.clone());
    let tracker = ExecutionTracker::new(
        vehicles.clone(),
        location.clone(),
        store.clone(),
        clock.clone(),
        Duration::from_secs(30),
    );

    World { store, vehicles, transport, routing, location, clock, engine, notifier, optimizer, tracker }
}

pub fn slot_dest(d: NaiveDate, vehicle: &str, shift: Shift) -> Destination {
    Destination::Slot { date: d, vehicle_id: vehicle.into(), shift }
}

pub fn slot_key(d: NaiveDate, vehicle: &str, shift: Shift) -> SlotKey {
    SlotKey { date: d, vehicle_id: vehicle.into(), shift }
}
