// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rota-core: Domain model for the Rota delivery scheduling & dispatch engine

pub mod macros;

pub mod clock;
pub mod id;
pub mod job;
pub mod lifecycle;
pub mod patch;
pub mod slot;
pub mod vehicle;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{
    AttemptRecord, Job, JobConfig, JobConfigBuilder, JobId, JobKind, JobStatus, PaymentDue,
    PaymentMethod, ProofOfDelivery, Shift,
};
pub use lifecycle::{LifecycleError, Transition};
pub use patch::{JobPatch, Patch, VehiclePatch};
pub use slot::SlotKey;
#[cfg(any(test, feature = "test-support"))]
pub use vehicle::VehicleBuilder;
pub use vehicle::{RouteStatus, Vehicle, VehicleId};
