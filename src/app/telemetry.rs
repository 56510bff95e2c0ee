//! Telemetry record and its wire encoding.
//!
//! One compact JSON object per successful cycle, seven keys in a fixed
//! order.  Key order follows the struct's field order, which `serde`
//! preserves, so the payload is byte-for-byte deterministic for a given
//! record and needs no schema on the receiving side:
//!
//! ```text
//! {"temperature":24.5,"humidity":52.0,"pir_state":true,"ldr_value":200,
//!  "light_state":true,"fan_state":true,"ac_state":true}
//! ```

use serde::Serialize;

use super::model::{ActuatorState, SensorReading};
use crate::error::CommsError;

/// Snapshot of one cycle: sensor inputs plus the relay states read back
/// after the policy was applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryRecord {
    #[serde(rename = "temperature")]
    pub temperature_c: f32,
    #[serde(rename = "humidity")]
    pub humidity_pct: f32,
    #[serde(rename = "pir_state")]
    pub motion_detected: bool,
    #[serde(rename = "ldr_value")]
    pub light_level: u16,
    #[serde(rename = "light_state")]
    pub light_on: bool,
    #[serde(rename = "fan_state")]
    pub fan_on: bool,
    #[serde(rename = "ac_state")]
    pub ac_on: bool,
}

impl TelemetryRecord {
    /// Build from a valid reading and the relay states observed after
    /// actuation.  There is no constructor from a failed read.
    pub fn new(reading: &SensorReading, actuators: ActuatorState) -> Self {
        Self {
            temperature_c: reading.climate.temperature_c(),
            humidity_pct: reading.climate.humidity_pct(),
            motion_detected: reading.motion_detected,
            light_level: reading.light_level,
            light_on: actuators.light_on,
            fan_on: actuators.fan_on,
            ac_on: actuators.ac_on,
        }
    }

    pub fn actuators(&self) -> ActuatorState {
        ActuatorState {
            light_on: self.light_on,
            fan_on: self.fan_on,
            ac_on: self.ac_on,
        }
    }

    /// Serialise to the compact JSON payload.
    pub fn encode(&self) -> Result<String, CommsError> {
        serde_json::to_string(self).map_err(|_| CommsError::PayloadEncoding)
    }
}
