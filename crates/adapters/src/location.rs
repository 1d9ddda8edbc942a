// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vehicle location provider boundary (GPS reads).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from location reads
#[derive(Debug, Clone, Error)]
pub enum LocationError {
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// A GPS fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Live position reads for the tracked vehicle.
#[async_trait]
pub trait LocationProvider: Clone + Send + Sync + 'static {
    async fn read_position(&self) -> Result<Position, LocationError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{LocationError, LocationProvider, Position};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeLocationState {
        queue: VecDeque<Result<Position, LocationError>>,
        reads: usize,
    }

    /// Scripted location provider: reads pop a queue of fixes/errors and
    /// report "no fix" when the queue runs dry.
    #[derive(Clone, Default)]
    pub struct FakeLocationProvider {
        inner: Arc<Mutex<FakeLocationState>>,
    }

    impl FakeLocationProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_position(&self, latitude: f64, longitude: f64) {
            self.inner.lock().queue.push_back(Ok(Position { latitude, longitude }));
        }

        pub fn push_error(&self, reason: &str) {
            self.inner
                .lock()
                .queue
                .push_back(Err(LocationError::Unavailable(reason.to_string())));
        }

        /// Number of reads issued so far.
        pub fn reads(&self) -> usize {
            self.inner.lock().reads
        }
    }

    #[async_trait]
    impl LocationProvider for FakeLocationProvider {
        async fn read_position(&self) -> Result<Position, LocationError> {
            let mut state = self.inner.lock();
            state.reads += 1;
            state
                .queue
                .pop_front()
                .unwrap_or_else(|| Err(LocationError::Unavailable("no fix".to_string())))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLocationProvider;

#[cfg(test)]
#[path = "location_tests.rs"]
mod tests;
