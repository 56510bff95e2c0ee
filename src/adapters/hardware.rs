//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the three relay drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only
//! module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use crate::app::model::ClimateReading;
use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::error::SensorError;
use crate::pins;
use crate::sensors::SensorHub;
use crate::sensors::dht22::Dht22;
use crate::sensors::light::LightSensor;
use crate::sensors::motion::MotionSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    light: RelayDriver,
    fan: RelayDriver,
    ac: RelayDriver,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: SensorHub,
        light: RelayDriver,
        fan: RelayDriver,
        ac: RelayDriver,
    ) -> Self {
        Self {
            sensor_hub,
            light,
            fan,
            ac,
        }
    }

    /// Wire every driver to its board pin.
    pub fn on_board_pins() -> Self {
        Self::new(
            SensorHub::new(
                Dht22::new(pins::DHT_GPIO),
                MotionSensor::new(pins::PIR_GPIO),
                LightSensor::new(pins::LDR_ADC_CHANNEL),
            ),
            RelayDriver::new(pins::LIGHT_RELAY_GPIO, "light"),
            RelayDriver::new(pins::FAN_RELAY_GPIO, "fan"),
            RelayDriver::new(pins::AC_RELAY_GPIO, "ac"),
        )
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.sensor_hub.read_climate()
    }

    fn read_motion(&mut self) -> bool {
        self.sensor_hub.read_motion()
    }

    fn read_light_level(&mut self) -> u16 {
        self.sensor_hub.read_light_level()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_light(&mut self, on: bool) {
        self.light.set(on);
    }

    fn set_fan(&mut self, on: bool) {
        self.fan.set(on);
    }

    fn set_ac(&mut self, on: bool) {
        self.ac.set(on);
    }

    fn is_light_on(&self) -> bool {
        self.light.is_on()
    }

    fn is_fan_on(&self) -> bool {
        self.fan.is_on()
    }

    fn is_ac_on(&self) -> bool {
        self.ac.is_on()
    }
}
