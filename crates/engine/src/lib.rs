// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rota-engine: orchestration layer for delivery scheduling & dispatch.
//!
//! Ties the pure domain in `rota-core` to the external collaborators in
//! `rota-adapters`: slot assignment with optimistic board updates, owed
//! notification dispatch, route optimization proposals, and driver-facing
//! execution tracking.

pub mod assignment;
pub mod config;
pub mod notifier;
pub mod optimizer;
pub mod tracker;

pub use assignment::{AssignmentEngine, Destination, MoveError, RescheduleReport};
pub use config::{interpolate, ConfigError, DispatchConfig, MessageTemplates};
pub use notifier::{owed_by_vehicle, pending_for, DispatchError, DispatchNotifier, NotificationSplit};
pub use optimizer::{OptimizeError, Proposal, RouteOptimizer};
pub use tracker::{ExecutionTracker, RouteHandle, TrackerError};
