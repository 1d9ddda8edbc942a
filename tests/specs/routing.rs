// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route optimization specs
//!
//! Verify the proposal/apply split over a live board: candidate filtering,
//! the unchanged-order no-op, and recovery from a half-applied order.

use super::prelude::*;

fn routed_job(d: NaiveDate, address: &str, order: u32) -> Job {
    let mut job = scheduled_job(d, "veh-7", Shift::Morning);
    job.address = address.to_string();
    job.route_order = Some(order);
    job
}

#[tokio::test]
async fn proposal_with_same_order_reports_no_change() {
    let d = date(2025, 6, 10);
    let jobs =
        vec![routed_job(d, "Rua A 1", 1), routed_job(d, "Rua B 2", 2), routed_job(d, "Rua C 3", 3)];
    let w = world(jobs.clone()).await;

    let stops = w.engine.snapshot();
    let members = slot::jobs_in(&stops, &slot_key(d, "veh-7", Shift::Morning));
    let owned: Vec<Job> = members.into_iter().cloned().collect();
    let proposal = w.optimizer.optimize(&owned, "Depot").await.unwrap();

    assert!(!proposal.changed);
    w.optimizer.apply(&proposal).await.unwrap();
    for (i, job) in jobs.iter().enumerate() {
        assert_eq!(w.store.job(&job.id).route_order, Some(i as u32 + 1));
    }
}

#[tokio::test]
async fn applied_proposal_renumbers_the_vehicle_stops() {
    let d = date(2025, 6, 10);
    let jobs =
        vec![routed_job(d, "Rua A 1", 1), routed_job(d, "Rua B 2", 2), routed_job(d, "Rua C 3", 3)];
    let w = world(jobs.clone()).await;
    w.routing.set_order(vec![2, 0, 1]);
    w.routing.set_totals(9_400, 1_260);

    let proposal = w.optimizer.optimize(&jobs, "Depot").await.unwrap();
    assert!(proposal.changed);
    assert_eq!(proposal.total_distance_m, 9_400);

    w.optimizer.apply(&proposal).await.unwrap();
    w.engine.refresh().await.unwrap();

    let snapshot = w.engine.snapshot();
    let ordered = slot::jobs_in(&snapshot, &slot_key(d, "veh-7", Shift::Morning));
    let addresses: Vec<_> = ordered.iter().map(|j| j.address.as_str()).collect();
    assert_eq!(addresses, vec!["Rua C 3", "Rua A 1", "Rua B 2"]);
}

#[tokio::test]
async fn half_applied_order_is_detectable_and_recoverable() {
    let d = date(2025, 6, 10);
    let jobs =
        vec![routed_job(d, "Rua A 1", 1), routed_job(d, "Rua B 2", 2), routed_job(d, "Rua C 3", 3)];
    let w = world(jobs.clone()).await;
    w.routing.set_order(vec![2, 1, 0]);

    let proposal = w.optimizer.optimize(&jobs, "Depot").await.unwrap();
    w.store.fail_updates_after(1);
    let err = w.optimizer.apply(&proposal).await.unwrap_err();

    let rota_engine::OptimizeError::PartialApply { applied, total, .. } = err else {
        panic!("expected PartialApply");
    };
    assert_eq!((applied, total), (1, 3));

    // Re-reading shows the renumbered prefix; re-applying finishes the job.
    assert_eq!(w.store.job(&jobs[2].id).route_order, Some(1));
    assert_eq!(w.store.job(&jobs[0].id).route_order, Some(1));
    w.optimizer.apply(&proposal).await.unwrap();
    assert_eq!(w.store.job(&jobs[0].id).route_order, Some(3));
}

#[tokio::test]
async fn assistance_without_address_never_reaches_the_provider() {
    let d = date(2025, 6, 10);
    let mut no_address = scheduled_job(d, "veh-7", Shift::Morning);
    no_address.address = String::new();
    let jobs = vec![routed_job(d, "Rua A 1", 1), routed_job(d, "Rua B 2", 2), no_address];
    let w = world(jobs.clone()).await;

    w.optimizer.optimize(&jobs, "Depot").await.unwrap();
    assert_eq!(w.routing.calls()[0].1.len(), 2);
}
