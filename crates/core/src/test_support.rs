// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::job::{Job, JobStatus, PaymentDue, PaymentMethod, ProofOfDelivery, Shift};
use crate::vehicle::VehicleId;
use chrono::NaiveDate;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core domain types.
pub mod strategies {
    use crate::job::{JobKind, JobStatus, Shift};
    use proptest::prelude::*;

    pub fn arb_shift() -> impl Strategy<Value = Shift> {
        prop_oneof![Just(Shift::Morning), Just(Shift::Afternoon), Just(Shift::Commercial)]
    }

    pub fn arb_job_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![
            Just(JobStatus::Pending),
            Just(JobStatus::Scheduled),
            Just(JobStatus::AwaitingRelease),
            Just(JobStatus::Delivered),
            Just(JobStatus::Cancelled),
        ]
    }

    pub fn arb_job_kind() -> impl Strategy<Value = JobKind> {
        prop_oneof![Just(JobKind::Delivery), Just(JobKind::Assistance)]
    }
}

// ── Factory functions ───────────────────────────────────────────────────

/// Calendar date literal for tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// A job scheduled into the given slot.
pub fn scheduled_job(d: NaiveDate, vehicle_id: impl Into<VehicleId>, shift: Shift) -> Job {
    Job::builder()
        .status(JobStatus::Scheduled)
        .scheduled_date(d)
        .vehicle_id(vehicle_id)
        .shift(shift)
        .build()
}

/// A valid proof-of-delivery bundle (signature + one photo).
pub fn valid_proof() -> ProofOfDelivery {
    ProofOfDelivery {
        signature_ref: "sig/1.png".to_string(),
        photo_refs: vec!["photo/goods-1.jpg".to_string()],
        payment_proof_ref: None,
        latitude: Some(-23.55),
        longitude: Some(-46.63),
        completed_at_ms: 0,
    }
}

/// A payment of `amount_cents` to collect in cash.
pub fn cash_due(amount_cents: u64) -> PaymentDue {
    PaymentDue { amount_cents, method: PaymentMethod::Cash }
}
