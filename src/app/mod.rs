//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the SmartRoom controller:
//! the occupancy policy, the telemetry record, the retry policy, and the
//! control loop that ties them together.  All interaction with hardware and
//! the network happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod model;
pub mod policy;
pub mod ports;
pub mod retry;
pub mod service;
pub mod telemetry;
