//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver.  The control loop reads through it one
//! value at a time because a failed climate read must stop the cycle before
//! motion or light are sampled.

pub mod dht22;
pub mod light;
pub mod motion;

use crate::app::model::ClimateReading;
use crate::error::SensorError;
use dht22::Dht22;
use light::LightSensor;
use motion::MotionSensor;

/// Aggregates all sensor drivers.
pub struct SensorHub {
    pub climate: Dht22,
    pub motion: MotionSensor,
    pub light: LightSensor,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where pin assignment is established).
    pub fn new(climate: Dht22, motion: MotionSensor, light: LightSensor) -> Self {
        Self {
            climate,
            motion,
            light,
        }
    }

    pub fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate.read()
    }

    pub fn read_motion(&self) -> bool {
        self.motion.read()
    }

    pub fn read_light_level(&self) -> u16 {
        self.light.read()
    }
}
