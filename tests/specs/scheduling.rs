// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling specs
//!
//! Verify slot assignment, triage, hold, idempotent moves, and the bulk
//! day reschedule through the assignment engine.

use super::prelude::*;

#[tokio::test]
async fn scheduled_jobs_always_carry_a_full_slot() {
    let job = JobBuilder::default().build();
    let w = world(vec![job.clone()]).await;

    let moved = w
        .engine
        .move_job(&job.id, slot_dest(date(2025, 6, 10), "veh-7", Shift::Morning))
        .await
        .unwrap();

    assert_eq!(moved.status, JobStatus::Scheduled);
    assert!(moved.scheduled_date.is_some() && moved.vehicle_id.is_some());

    let back = w.engine.move_job(&job.id, Destination::Triage).await.unwrap();
    assert_eq!(back.status, JobStatus::Pending);
    assert!(back.scheduled_date.is_none() && back.vehicle_id.is_none());
}

#[tokio::test]
async fn moved_to_triage_means_no_slot_holds_the_job() {
    let d = date(2025, 6, 10);
    let job = scheduled_job(d, "veh-7", Shift::Morning);
    let w = world(vec![job.clone()]).await;

    w.engine.move_job(&job.id, Destination::Triage).await.unwrap();

    let snapshot = w.engine.snapshot();
    let triaged = slot::triage(&snapshot);
    assert_eq!(triaged.len(), 1);
    assert_eq!(triaged[0].id, job.id);
    for shift in [Shift::Morning, Shift::Afternoon, Shift::Commercial] {
        assert!(slot::jobs_in(&snapshot, &slot_key(d, "veh-7", shift)).is_empty());
    }
}

#[tokio::test]
async fn double_move_to_the_same_slot_equals_a_single_move() {
    let job = JobBuilder::default().build();
    let w = world(vec![job.clone()]).await;
    let dest = slot_dest(date(2025, 6, 10), "veh-7", Shift::Morning);

    let once = w.engine.move_job(&job.id, dest.clone()).await.unwrap();
    let twice = w.engine.move_job(&job.id, dest).await.unwrap();

    similar_asserts::assert_eq!(once, twice);
    similar_asserts::assert_eq!(w.store.job(&job.id), once);
}

#[tokio::test]
async fn assign_then_failed_attempt_returns_to_triage_with_a_count() {
    let job = JobBuilder::default().build();
    let w = world(vec![job.clone()]).await;

    let scheduled = w
        .engine
        .move_job(&job.id, slot_dest(date(2025, 6, 10), "veh-7", Shift::Morning))
        .await
        .unwrap();
    assert_eq!(scheduled.status, JobStatus::Scheduled);

    let failed = w
        .tracker
        .mark_failed_attempt(&job.id, "photo/door.jpg", "cliente ausente")
        .await
        .unwrap();

    assert_eq!(failed.status, JobStatus::Pending);
    assert_eq!(failed.attempt_count, 1);
    assert!(failed.scheduled_date.is_none());
}

#[tokio::test]
async fn bulk_reschedule_empties_the_day_and_notifies_every_customer() {
    let d = date(2025, 6, 10);
    let jobs: Vec<Job> = (0..4)
        .map(|i| {
            let mut job = scheduled_job(d, if i % 2 == 0 { "veh-7" } else { "veh-9" }, Shift::Morning);
            job.order_number = format!("ORD-{i}");
            job
        })
        .collect();
    let w = world(jobs.clone()).await;

    let report = w.engine.reschedule_day(d).await;

    assert_eq!(report.rescheduled.len(), 4);
    assert_eq!(report.notified.len(), 4);
    for job in &jobs {
        let stored = w.store.job(&job.id);
        assert_eq!(stored.status, JobStatus::Pending);
        assert!(stored.scheduled_date.is_none());
    }
    let singles = w.transport.singles();
    assert_eq!(singles.len(), 4);
    assert!(singles.iter().all(|m| m.template == TemplateKind::Rescheduled));
}

#[tokio::test]
async fn held_jobs_leave_the_board_until_released() {
    let job = scheduled_job(date(2025, 6, 10), "veh-7", Shift::Morning);
    let w = world(vec![job.clone()]).await;

    w.engine
        .move_job(&job.id, Destination::AwaitingRelease { reason: "product damaged".to_string() })
        .await
        .unwrap();

    let snapshot = w.engine.snapshot();
    assert!(slot::triage(&snapshot).is_empty());
    assert_eq!(slot::held(&snapshot).len(), 1);

    w.engine.release(&job.id).await.unwrap();
    let snapshot = w.engine.snapshot();
    assert_eq!(slot::triage(&snapshot).len(), 1);
    assert!(slot::held(&snapshot).is_empty());
}
