// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routing / distance-matrix provider boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from routing operations
#[derive(Debug, Clone, Error)]
pub enum RoutingError {
    #[error("routing provider: {0}")]
    Provider(String),
    #[error("routing provider returned a malformed response: {0}")]
    BadResponse(String),
}

/// One leg of an optimized route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Stop indices into the request's stop list; the origin is not a stop.
    pub from_index: usize,
    pub to_index: usize,
    pub distance_m: u32,
    pub duration_s: u32,
}

/// Provider response: a visiting order over the requested stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedRoute {
    /// Permutation of `0..stops.len()`: visit `stops[order[0]]` first.
    pub order: Vec<usize>,
    pub total_distance_m: u32,
    pub total_duration_s: u32,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// Stop-reordering for a single vehicle's route.
#[async_trait]
pub trait RoutingProvider: Clone + Send + Sync + 'static {
    /// Ask the provider for the best visiting order over `stops`, starting
    /// from `origin`.
    async fn optimize_waypoints(
        &self,
        origin: &str,
        stops: &[String],
    ) -> Result<OptimizedRoute, RoutingError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{OptimizedRoute, RoutingError, RoutingProvider};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeRoutingState {
        /// Visiting order to return; identity when unset.
        order: Option<Vec<usize>>,
        total_distance_m: u32,
        total_duration_s: u32,
        calls: Vec<(String, Vec<String>)>,
        fail_next: bool,
    }

    /// Scripted routing provider for testing.
    #[derive(Clone, Default)]
    pub struct FakeRoutingProvider {
        inner: Arc<Mutex<FakeRoutingState>>,
    }

    impl FakeRoutingProvider {
        pub fn new() -> Self {
            Self::default()
        }

        /// Script the visiting order for the next calls.
        pub fn set_order(&self, order: Vec<usize>) {
            self.inner.lock().order = Some(order);
        }

        pub fn set_totals(&self, distance_m: u32, duration_s: u32) {
            let mut state = self.inner.lock();
            state.total_distance_m = distance_m;
            state.total_duration_s = duration_s;
        }

        pub fn fail_next(&self) {
            self.inner.lock().fail_next = true;
        }

        /// Recorded `(origin, stops)` requests.
        pub fn calls(&self) -> Vec<(String, Vec<String>)> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl RoutingProvider for FakeRoutingProvider {
        async fn optimize_waypoints(
            &self,
            origin: &str,
            stops: &[String],
        ) -> Result<OptimizedRoute, RoutingError> {
            let mut state = self.inner.lock();
            state.calls.push((origin.to_string(), stops.to_vec()));
            if state.fail_next {
                state.fail_next = false;
                return Err(RoutingError::Provider("quota exceeded".to_string()));
            }
            let order =
                state.order.clone().unwrap_or_else(|| (0..stops.len()).collect());
            Ok(OptimizedRoute {
                order,
                total_distance_m: state.total_distance_m,
                total_duration_s: state.total_duration_s,
                legs: Vec::new(),
            })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeRoutingProvider;

#[cfg(test)]
#[path = "routing_tests.rs"]
mod tests;
