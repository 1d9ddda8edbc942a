// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Vehicle entity.
//!
//! Fleet CRUD lives outside this crate; the engine only mutates a vehicle
//! while one of its routes is active (live position, driver, shift).

use crate::job::Shift;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Unique identifier for a delivery vehicle.
    pub struct VehicleId("veh-");
}

/// Whether the vehicle is currently out on a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Idle,
    InTransit,
}

crate::simple_display! {
    RouteStatus {
        Idle => "idle",
        InTransit => "in_transit",
    }
}

/// A delivery vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub plate: String,
    /// Last reported position, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_ms: Option<u64>,
    pub route_status: RouteStatus,
    /// Driver on the active route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_shift: Option<Shift>,
}

crate::builder! {
    pub struct VehicleBuilder => Vehicle {
        into {
            id: VehicleId = VehicleId::new(),
            name: String = "Truck 1",
            plate: String = "ABC-1234",
        }
        set {
            route_status: RouteStatus = RouteStatus::Idle,
        }
        option {
            latitude: f64 = None,
            longitude: f64 = None,
            last_update_ms: u64 = None,
            active_driver: String = None,
            active_shift: Shift = None,
        }
    }
}

#[cfg(test)]
#[path = "vehicle_tests.rs"]
mod tests;
