// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound message transport boundary.
//!
//! The transport reports batch results as a whole: either every message was
//! accepted or the batch failed. There is no per-message acknowledgment, so
//! callers must not mark anything sent on failure.

use async_trait::async_trait;
use rota_core::JobId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from transport operations
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("transport unreachable: {0}")]
    Unreachable(String),
    #[error("transport rejected the send: {0}")]
    Rejected(String),
}

/// Which message template an outbound message was rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    ScheduledReminder,
    Rescheduled,
}

/// One rendered customer message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub job_id: JobId,
    /// Destination address on the messaging channel (customer phone).
    pub channel_address: String,
    pub template: TemplateKind,
    pub body: String,
}

/// Outbound customer messaging.
#[async_trait]
pub trait MessageTransport: Clone + Send + Sync + 'static {
    /// Send a batch of messages. Whole-batch result only: `Ok` means every
    /// message was accepted, `Err` means none may be assumed sent.
    async fn send_batch(&self, messages: &[OutboundMessage]) -> Result<(), TransportError>;

    /// Send a single one-off message.
    async fn send_single(&self, message: &OutboundMessage) -> Result<(), TransportError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{MessageTransport, OutboundMessage, TransportError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rota_core::JobId;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeTransportState {
        batches: Vec<Vec<OutboundMessage>>,
        singles: Vec<OutboundMessage>,
        fail_next_batch: bool,
        fail_singles_for: HashSet<JobId>,
    }

    /// Recording transport for testing, with injectable failures.
    #[derive(Clone, Default)]
    pub struct FakeTransport {
        inner: Arc<Mutex<FakeTransportState>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// All batches accepted so far.
        pub fn batches(&self) -> Vec<Vec<OutboundMessage>> {
            self.inner.lock().batches.clone()
        }

        /// All single sends accepted so far.
        pub fn singles(&self) -> Vec<OutboundMessage> {
            self.inner.lock().singles.clone()
        }

        pub fn fail_next_batch(&self) {
            self.inner.lock().fail_next_batch = true;
        }

        /// Reject single sends addressed to this job.
        pub fn fail_singles_for(&self, job_id: JobId) {
            self.inner.lock().fail_singles_for.insert(job_id);
        }
    }

    #[async_trait]
    impl MessageTransport for FakeTransport {
        async fn send_batch(&self, messages: &[OutboundMessage]) -> Result<(), TransportError> {
            let mut state = self.inner.lock();
            if state.fail_next_batch {
                state.fail_next_batch = false;
                return Err(TransportError::Unreachable("gateway timeout".to_string()));
            }
            state.batches.push(messages.to_vec());
            Ok(())
        }

        async fn send_single(&self, message: &OutboundMessage) -> Result<(), TransportError> {
            let mut state = self.inner.lock();
            if state.fail_singles_for.contains(&message.job_id) {
                return Err(TransportError::Rejected(format!(
                    "invalid address for {}",
                    message.job_id
                )));
            }
            state.singles.push(message.clone());
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTransport;

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
