// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver execution specs
//!
//! A full route day: start the route, report positions, deliver with proof
//! (collecting payment where due), fail an attempt, stop the route.

use super::prelude::*;
use rota_core::RouteStatus;

#[tokio::test(start_paused = true)]
async fn a_route_day_from_start_to_stop() {
    let d = date(2025, 6, 10);
    let mut cash_job = scheduled_job(d, "veh-7", Shift::Morning);
    cash_job.payment_due = Some(cash_due(25_000));
    let absent_job = scheduled_job(d, "veh-7", Shift::Morning);
    let w = world(vec![cash_job.clone(), absent_job.clone()]).await;
    w.location.push_position(-23.55, -46.63);

    let handle =
        w.tracker.start_route(&"veh-7".into(), "Carlos", Shift::Morning).await.unwrap();
    assert_eq!(w.vehicles.vehicle(&"veh-7".into()).route_status, RouteStatus::InTransit);

    // First tick lands a position.
    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(w.vehicles.vehicle(&"veh-7".into()).latitude, Some(-23.55));

    // Payment due: the bare proof is rejected until a receipt is attached.
    let err = w.tracker.mark_delivered(&cash_job.id, valid_proof()).await.unwrap_err();
    assert!(matches!(
        err,
        rota_engine::TrackerError::Lifecycle(rota_core::LifecycleError::PaymentProofRequired)
    ));
    let mut proof = valid_proof();
    proof.payment_proof_ref = Some("receipt/1.pdf".to_string());
    w.clock.set_epoch_ms(36_000_000);
    let delivered = w.tracker.mark_delivered(&cash_job.id, proof).await.unwrap();
    assert_eq!(delivered.status, JobStatus::Delivered);
    assert_eq!(delivered.proof.as_ref().map(|p| p.completed_at_ms), Some(36_000_000));

    // Nobody home at the second stop.
    let failed = w
        .tracker
        .mark_failed_attempt(&absent_job.id, "photo/door.jpg", "cliente ausente")
        .await
        .unwrap();
    assert_eq!(failed.status, JobStatus::Pending);
    assert_eq!(failed.attempt_count, 1);

    w.tracker.stop_route(handle).await.unwrap();
    let vehicle = w.vehicles.vehicle(&"veh-7".into());
    assert_eq!(vehicle.route_status, RouteStatus::Idle);
    assert!(vehicle.active_driver.is_none());
}

#[tokio::test(start_paused = true)]
async fn delivered_jobs_disappear_from_owed_and_board_queries() {
    let d = date(2025, 6, 10);
    let job = scheduled_job(d, "veh-7", Shift::Morning);
    let w = world(vec![job.clone()]).await;

    w.tracker.mark_delivered(&job.id, valid_proof()).await.unwrap();
    w.engine.refresh().await.unwrap();

    let snapshot = w.engine.snapshot();
    assert!(pending_for(&snapshot).owed.is_empty());
    assert!(slot::triage(&snapshot).is_empty());
    // Delivered jobs keep their slot fields for the day's history, but are
    // terminal for every lifecycle command.
    let err = w
        .engine
        .move_job(&job.id, Destination::Triage)
        .await
        .unwrap_err();
    assert!(matches!(err, rota_engine::MoveError::Lifecycle(_)));
}

#[tokio::test(start_paused = true)]
async fn gps_outage_does_not_stop_reporting() {
    let w = world(vec![]).await;
    w.location.push_error("tunnel");
    w.location.push_error("tunnel");
    w.location.push_position(-23.60, -46.70);

    let handle =
        w.tracker.start_route(&"veh-7".into(), "Carlos", Shift::Morning).await.unwrap();
    tokio::time::sleep(Duration::from_secs(95)).await;

    // Two skipped ticks, then the third lands.
    let vehicle = w.vehicles.vehicle(&"veh-7".into());
    assert_eq!(vehicle.latitude, Some(-23.60));
    w.tracker.stop_route(handle).await.unwrap();
}
