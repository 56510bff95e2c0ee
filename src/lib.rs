//! SmartRoom firmware library.
//!
//! Exposes the control loop, its ports and the concrete adapters for
//! integration testing and the binary.  All ESP-IDF-specific code is
//! guarded by `#[cfg(target_os = "espidf")]` within each module; host
//! builds get simulation stubs instead.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;
