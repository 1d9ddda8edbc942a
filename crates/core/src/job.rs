// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery/assistance job entity.
//!
//! A [`Job`] is the unit of scheduling: it is created in triage (no date, no
//! vehicle), assigned to a `(date, vehicle, shift)` slot, and driven through
//! the lifecycle in [`crate::lifecycle`] until it is delivered or cancelled.

use crate::slot::SlotKey;
use crate::vehicle::VehicleId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a delivery or assistance job.
    pub struct JobId("job-");
}

/// The two flavors of schedulable work.
///
/// Deliveries carry goods (and possibly a payment to collect); assistance
/// visits are technician appointments with no proof-of-delivery bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Delivery,
    Assistance,
}

crate::simple_display! {
    JobKind {
        Delivery => "delivery",
        Assistance => "assistance",
    }
}

/// Sub-day scheduling bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
    Commercial,
}

crate::simple_display! {
    Shift {
        Morning => "morning",
        Afternoon => "afternoon",
        Commercial => "commercial",
    }
}

/// Lifecycle status of a job.
///
/// `Delivered` doubles as "completed" for assistance visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// In triage, waiting for a slot.
    Pending,
    /// Assigned to a `(date, vehicle, shift)` slot.
    Scheduled,
    /// Parked with a reason; must be released back to triage first.
    AwaitingRelease,
    /// Terminal: goods delivered / visit completed.
    Delivered,
    /// Terminal: called off.
    Cancelled,
}

impl JobStatus {
    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Delivered | JobStatus::Cancelled)
    }
}

crate::simple_display! {
    JobStatus {
        Pending => "pending",
        Scheduled => "scheduled",
        AwaitingRelease => "awaiting_release",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

/// How a collected payment is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
    Invoice,
}

/// Outstanding payment to collect on delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDue {
    pub amount_cents: u64,
    pub method: PaymentMethod,
}

/// Record of one failed delivery attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Reference to the photo taken at the delivery location.
    pub photo_ref: String,
    /// Driver-entered reason (e.g. "customer absent").
    pub reason: String,
    pub recorded_at_ms: u64,
}

/// Proof captured when a delivery is completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofOfDelivery {
    /// Reference to the customer signature capture.
    pub signature_ref: String,
    /// References to delivered-goods photos; at least one is required.
    pub photo_refs: Vec<String>,
    /// Payment receipt reference; required when a payment was due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_proof_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub completed_at_ms: u64,
}

/// Configuration for creating a new job (also the draft sent to the store's
/// `create` operation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub kind: JobKind,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_number: String,
    pub address: String,
    pub payment_due: Option<PaymentDue>,
}

impl JobConfig {
    pub fn builder(kind: JobKind, customer_name: impl Into<String>) -> JobConfigBuilder {
        JobConfigBuilder {
            kind,
            customer_name: customer_name.into(),
            customer_phone: String::new(),
            order_number: String::new(),
            address: String::new(),
            payment_due: None,
        }
    }
}

pub struct JobConfigBuilder {
    kind: JobKind,
    customer_name: String,
    customer_phone: String,
    order_number: String,
    address: String,
    payment_due: Option<PaymentDue>,
}

impl JobConfigBuilder {
    crate::setters! {
        into {
            customer_phone: String,
            order_number: String,
            address: String,
        }
        option {
            payment_due: PaymentDue,
        }
    }

    pub fn build(self) -> JobConfig {
        JobConfig {
            kind: self.kind,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            order_number: self.order_number,
            address: self.address,
            payment_due: self.payment_due,
        }
    }
}

/// A delivery or assistance job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub kind: JobKind,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_number: String,
    /// Delivery/visit street address. Jobs without one are excluded from
    /// route optimization.
    #[serde(default)]
    pub address: String,
    /// Absent means the job is in triage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
    /// Absent means unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<VehicleId>,
    /// Position within the vehicle's stop sequence for the day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_order: Option<u32>,
    pub status: JobStatus,
    /// Last (date, shift) pair for which an outbound message was confirmed
    /// sent. Rescheduling makes this pair stale, which re-arms the
    /// notification without an explicit reset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_sent_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_sent_shift: Option<Shift>,
    /// Failed delivery attempts. Only ever increases.
    #[serde(default)]
    pub attempt_count: u32,
    #[serde(default)]
    pub attempt_log: Vec<AttemptRecord>,
    /// Reason recorded by the hold transition; cleared on release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_reason: Option<String>,
    /// Proof-of-delivery bundle (Delivery only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<ProofOfDelivery>,
    /// Payment to collect on delivery (Delivery only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_due: Option<PaymentDue>,
}

impl Job {
    /// Create a new job in triage.
    pub fn new(config: JobConfig) -> Self {
        Self {
            id: JobId::new(),
            kind: config.kind,
            customer_name: config.customer_name,
            customer_phone: config.customer_phone,
            order_number: config.order_number,
            address: config.address,
            scheduled_date: None,
            shift: None,
            vehicle_id: None,
            route_order: None,
            status: JobStatus::Pending,
            notification_sent_date: None,
            notification_sent_shift: None,
            attempt_count: 0,
            attempt_log: Vec::new(),
            hold_reason: None,
            proof: None,
            payment_due: config.payment_due,
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Membership test for a `(date, vehicle, shift)` slot.
    pub fn in_slot(&self, key: &SlotKey) -> bool {
        self.scheduled_date == Some(key.date)
            && self.vehicle_id.as_ref() == Some(&key.vehicle_id)
            && self.shift == Some(key.shift)
    }

    /// A job is owed a notification when it is still live and its last
    /// confirmed send does not match its current (date, shift).
    pub fn owes_notification(&self) -> bool {
        !self.is_terminal()
            && (self.notification_sent_date != self.scheduled_date
                || self.notification_sent_shift != self.shift)
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            id: JobId = JobId::new(),
            customer_name: String = "Alice Test",
            customer_phone: String = "+55 11 98000-0001",
            order_number: String = "ORD-100",
            address: String = "Rua das Acacias 100",
        }
        set {
            kind: JobKind = JobKind::Delivery,
            status: JobStatus = JobStatus::Pending,
            attempt_count: u32 = 0,
            attempt_log: Vec<AttemptRecord> = Vec::new(),
        }
        option {
            scheduled_date: NaiveDate = None,
            shift: Shift = None,
            vehicle_id: VehicleId = None,
            route_order: u32 = None,
            notification_sent_date: NaiveDate = None,
            notification_sent_shift: Shift = None,
            hold_reason: String = None,
            proof: ProofOfDelivery = None,
            payment_due: PaymentDue = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
