//! Per-cycle domain values: what the sensors said and what the relays are.

use crate::error::SensorError;

// ---------------------------------------------------------------------------
// Sensor side
// ---------------------------------------------------------------------------

/// A temperature/humidity pair from the combined sensor.
///
/// Both values are finite, or the reading does not exist: there is no way
/// to hold a valid temperature next to an invalid humidity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    temperature_c: f32,
    humidity_pct: f32,
}

impl ClimateReading {
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Result<Self, SensorError> {
        if !temperature_c.is_finite() || !humidity_pct.is_finite() {
            return Err(SensorError::NotANumber);
        }
        Ok(Self {
            temperature_c,
            humidity_pct,
        })
    }

    /// Air temperature (°C).
    pub fn temperature_c(&self) -> f32 {
        self.temperature_c
    }

    /// Relative humidity (%).
    pub fn humidity_pct(&self) -> f32 {
        self.humidity_pct
    }
}

/// Everything the control loop read in one successful cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub climate: ClimateReading,
    /// PIR output level.
    pub motion_detected: bool,
    /// Raw 12-bit LDR reading (0 – 4095).
    pub light_level: u16,
}

// ---------------------------------------------------------------------------
// Actuator side
// ---------------------------------------------------------------------------

/// On/off state of the three room relays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    pub light_on: bool,
    pub fan_on: bool,
    pub ac_on: bool,
}

impl ActuatorState {
    /// Every relay open; the boot default.
    pub const ALL_OFF: Self = Self {
        light_on: false,
        fan_on: false,
        ac_on: false,
    };
}
