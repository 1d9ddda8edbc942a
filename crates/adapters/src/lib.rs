// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rota-adapters: async trait boundaries to the external collaborators.
//!
//! The scheduling engine talks to the job and vehicle stores (system of
//! record), the outbound message transport, the routing provider, and the
//! vehicle location provider. Each boundary is a trait
//! here, with a `Fake*` implementation gated behind the `test-support`
//! feature for use in other crates' tests.

pub mod job_store;
pub mod location;
pub mod routing;
pub mod transport;
pub mod vehicle_store;

pub use job_store::{JobStore, JobStoreError};
pub use location::{LocationError, LocationProvider, Position};
pub use routing::{OptimizedRoute, RouteLeg, RoutingError, RoutingProvider};
pub use transport::{MessageTransport, OutboundMessage, TemplateKind, TransportError};
pub use vehicle_store::{VehicleStore, VehicleStoreError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use job_store::FakeJobStore;
#[cfg(any(test, feature = "test-support"))]
pub use location::FakeLocationProvider;
#[cfg(any(test, feature = "test-support"))]
pub use routing::FakeRoutingProvider;
#[cfg(any(test, feature = "test-support"))]
pub use transport::FakeTransport;
#[cfg(any(test, feature = "test-support"))]
pub use vehicle_store::FakeVehicleStore;
