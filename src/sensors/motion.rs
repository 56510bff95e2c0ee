//! HC-SR501 PIR motion sensor.
//!
//! The module's own retrigger timer holds the output HIGH while motion
//! persists; this driver only samples the level.  No debouncing.
//!
//! On host/test the level comes from `hw_init::sim_set_gpio`.

use crate::drivers::hw_init;

pub struct MotionSensor {
    gpio: i32,
}

impl MotionSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// `true` while the PIR output is HIGH.
    pub fn read(&self) -> bool {
        hw_init::gpio_read(self.gpio)
    }
}
