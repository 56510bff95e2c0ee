//! Single-channel relay driver (SRD-05VDC module, active HIGH).
//!
//! `set` is idempotent.  `is_on` reads the pin level back instead of
//! returning the last command, so telemetry reports what the line is
//! actually doing.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO configured input-output by hw_init.
//! On host/test: uses the simulated pin levels in hw_init.

use log::debug;

use crate::drivers::hw_init;

pub struct RelayDriver {
    gpio: i32,
    label: &'static str,
}

impl RelayDriver {
    pub fn new(gpio: i32, label: &'static str) -> Self {
        Self { gpio, label }
    }

    pub fn set(&mut self, on: bool) {
        if self.is_on() != on {
            debug!("relay {}: {}", self.label, if on { "ON" } else { "OFF" });
        }
        hw_init::gpio_write(self.gpio, on);
    }

    pub fn is_on(&self) -> bool {
        hw_init::gpio_read(self.gpio)
    }
}
