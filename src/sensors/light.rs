//! LDR ambient-light sensor on an ADC1 channel.
//!
//! The photoresistor sits in a voltage divider; the raw 12-bit code is
//! reported unscaled.  Lower values mean a darker room.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: oneshot read of the channel configured by hw_init.
//! On host/test: the value injected with `hw_init::sim_set_adc`.

use log::warn;

use crate::drivers::hw_init;

/// Full-scale 12-bit ADC code.
pub const ADC_MAX: u16 = 4095;

pub struct LightSensor {
    channel: u32,
}

impl LightSensor {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    /// Raw reading, clamped to 0 – 4095.  A driver error reads as 0.
    pub fn read(&self) -> u16 {
        match hw_init::adc1_read(self.channel) {
            Some(raw) => raw.min(ADC_MAX),
            None => {
                warn!("LDR: ADC1 CH{} read failed", self.channel);
                0
            }
        }
    }
}
