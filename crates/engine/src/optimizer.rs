// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route optimizer: single-vehicle stop reordering with an explicit apply.
//!
//! `optimize` never mutates anything; it returns a [`Proposal`] the caller
//! can inspect and discard. Only `apply` writes, one store update per stop,
//! sequentially. An interrupted apply leaves a renumbered prefix and an
//! old-valued suffix — detectable by re-reading, never silent corruption.

use rota_adapters::{JobStore, JobStoreError, RoutingError, RoutingProvider};
use rota_core::{Job, JobPatch, Patch};
use thiserror::Error;

/// Minimum routable stops worth optimizing.
pub const MIN_STOPS: usize = 2;

/// A proposed visiting order, not yet persisted.
#[derive(Debug, Clone)]
pub struct Proposal {
    /// Candidate jobs in proposed visiting order.
    pub ordered_jobs: Vec<Job>,
    pub total_distance_m: u32,
    pub total_duration_s: u32,
    /// True iff the proposed order differs from the input order.
    pub changed: bool,
}

/// Errors from route optimization
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("route optimization needs at least {MIN_STOPS} routable stops, got {0}")]
    TooFewStops(usize),
    #[error(transparent)]
    Routing(#[from] RoutingError),
    /// Apply was interrupted mid-sequence. `applied` stops carry the new
    /// order; the rest still hold their old values. Re-read and decide
    /// whether to re-apply.
    #[error("route apply interrupted after {applied} of {total} stops: {source}")]
    PartialApply {
        applied: usize,
        total: usize,
        source: JobStoreError,
    },
}

/// Stop-reordering over one vehicle's jobs.
#[derive(Clone)]
pub struct RouteOptimizer<R: RoutingProvider, S: JobStore> {
    routing: R,
    store: S,
}

impl<R: RoutingProvider, S: JobStore> RouteOptimizer<R, S> {
    pub fn new(routing: R, store: S) -> Self {
        Self { routing, store }
    }

    /// Ask the routing provider for the best visiting order.
    ///
    /// Jobs without an address and terminal jobs are excluded before the
    /// provider is called. Read-only: nothing is persisted.
    pub async fn optimize(&self, jobs: &[Job], origin: &str) -> Result<Proposal, OptimizeError> {
        let candidates: Vec<&Job> = jobs
            .iter()
            .filter(|j| !j.is_terminal() && !j.address.trim().is_empty())
            .collect();
        if candidates.len() < MIN_STOPS {
            return Err(OptimizeError::TooFewStops(candidates.len()));
        }

        let stops: Vec<String> = candidates.iter().map(|j| j.address.clone()).collect();
        let route = self.routing.optimize_waypoints(origin, &stops).await?;
        if !is_permutation(&route.order, candidates.len()) {
            return Err(OptimizeError::Routing(RoutingError::BadResponse(format!(
                "order {:?} is not a permutation of {} stops",
                route.order,
                candidates.len()
            ))));
        }

        let ordered_jobs: Vec<Job> =
            route.order.iter().map(|&i| candidates[i].clone()).collect();
        let changed = ordered_jobs
            .iter()
            .zip(candidates.iter())
            .any(|(proposed, current)| proposed.id != current.id);
        tracing::info!(
            stops = ordered_jobs.len(),
            changed,
            total_distance_m = route.total_distance_m,
            "route proposal computed"
        );
        Ok(Proposal {
            ordered_jobs,
            total_distance_m: route.total_distance_m,
            total_duration_s: route.total_duration_s,
            changed,
        })
    }

    /// Persist `route_order = index + 1` for each proposed stop.
    ///
    /// One sequential write per job, NOT atomic across the set: an
    /// interruption surfaces as [`OptimizeError::PartialApply`]. Re-applying
    /// the same proposal writes the same values, so retry is idempotent.
    pub async fn apply(&self, proposal: &Proposal) -> Result<(), OptimizeError> {
        let total = proposal.ordered_jobs.len();
        for (index, job) in proposal.ordered_jobs.iter().enumerate() {
            let patch = JobPatch {
                route_order: Patch::Set(index as u32 + 1),
                ..JobPatch::default()
            };
            if let Err(source) = self.store.update(&job.id, patch).await {
                tracing::warn!(
                    job_id = %job.id,
                    applied = index,
                    total,
                    "route apply interrupted"
                );
                return Err(OptimizeError::PartialApply { applied: index, total, source });
            }
        }
        tracing::info!(stops = total, "route order applied");
        Ok(())
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

#[cfg(test)]
#[path = "optimizer_tests.rs"]
mod tests;
