// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification specs
//!
//! Verify the (date, shift) dedup key end to end: partition, dispatch,
//! re-arming on reschedule, and whole-batch failure semantics.

use super::prelude::*;

#[tokio::test]
async fn dedup_key_matches_date_and_shift_exactly() {
    let d = date(2025, 6, 10);
    let mut job = scheduled_job(d, "veh-7", Shift::Morning);
    job.notification_sent_date = Some(d);
    job.notification_sent_shift = Some(Shift::Morning);
    let w = world(vec![job.clone()]).await;

    let split = pending_for(&w.engine.snapshot());
    assert!(split.owed.is_empty());
    assert_eq!(split.already_sent.len(), 1);

    // Moving to the afternoon shift re-arms the notification.
    w.engine
        .move_job(&job.id, slot_dest(d, "veh-7", Shift::Afternoon))
        .await
        .unwrap();

    let split = pending_for(&w.engine.snapshot());
    assert_eq!(split.owed.len(), 1);
    assert_eq!(split.owed[0].id, job.id);
}

#[tokio::test]
async fn only_the_unnotified_job_is_owed() {
    let d = date(2025, 6, 10);
    let mut notified = scheduled_job(d, "veh-7", Shift::Morning);
    notified.notification_sent_date = Some(d);
    notified.notification_sent_shift = Some(Shift::Morning);
    let fresh = scheduled_job(d, "veh-7", Shift::Morning);
    let w = world(vec![notified.clone(), fresh.clone()]).await;

    let split = pending_for(&w.engine.snapshot());
    assert_eq!(split.owed.len(), 1);
    assert_eq!(split.owed[0].id, fresh.id);
    assert_eq!(split.already_sent[0].id, notified.id);
}

#[tokio::test]
async fn dispatch_then_requery_leaves_nothing_owed() {
    let d = date(2025, 6, 10);
    let a = scheduled_job(d, "veh-7", Shift::Morning);
    let b = scheduled_job(d, "veh-7", Shift::Afternoon);
    let w = world(vec![a, b]).await;

    let split = pending_for(&w.engine.snapshot());
    assert_eq!(split.owed.len(), 2);
    w.notifier.dispatch(&split.owed).await.unwrap();

    // The board snapshot is reconciled from the store, then nothing is owed.
    w.engine.refresh().await.unwrap();
    let split = pending_for(&w.engine.snapshot());
    assert!(split.owed.is_empty());
    assert_eq!(split.already_sent.len(), 2);
}

#[tokio::test]
async fn transport_failure_keeps_the_owed_set_intact() {
    let d = date(2025, 6, 10);
    let job = scheduled_job(d, "veh-7", Shift::Morning);
    let w = world(vec![job]).await;
    w.transport.fail_next_batch();

    let split = pending_for(&w.engine.snapshot());
    let err = w.notifier.dispatch(&split.owed).await.unwrap_err();
    assert!(matches!(err, rota_engine::DispatchError::Transport(_)));

    // Nothing marked; the same owed set retries and drains.
    w.engine.refresh().await.unwrap();
    let split = pending_for(&w.engine.snapshot());
    assert_eq!(split.owed.len(), 1);
    w.notifier.dispatch(&split.owed).await.unwrap();

    w.engine.refresh().await.unwrap();
    assert!(pending_for(&w.engine.snapshot()).owed.is_empty());
}

#[tokio::test]
async fn reschedule_makes_yesterdays_notification_stale() {
    let d = date(2025, 6, 10);
    let job = scheduled_job(d, "veh-7", Shift::Morning);
    let w = world(vec![job.clone()]).await;

    let split = pending_for(&w.engine.snapshot());
    w.notifier.dispatch(&split.owed).await.unwrap();
    w.engine.refresh().await.unwrap();
    assert!(pending_for(&w.engine.snapshot()).owed.is_empty());

    // A new date re-arms it without touching the notification fields.
    w.engine
        .move_job(&job.id, slot_dest(date(2025, 6, 12), "veh-7", Shift::Morning))
        .await
        .unwrap();
    let split = pending_for(&w.engine.snapshot());
    assert_eq!(split.owed.len(), 1);
}
