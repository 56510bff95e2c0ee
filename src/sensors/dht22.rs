//! DHT22 (AM2302) combined temperature / humidity sensor.
//!
//! Single-wire protocol on an open-drain GPIO with pull-up:
//!
//! ```text
//!  host  ▔▔▔╲______ ≥1 ms ______╱▔▔ release
//!  dht            ╲__ 80 µs __╱▔▔ 80 µs ▔▔╲ 40 × (50 µs low, 26/70 µs high)
//! ```
//!
//! A bit is `1` when its high pulse lasts longer than about 40 µs.
//! Five bytes arrive MSB first: humidity (2), temperature (2), checksum (1).
//!
//! The part must not be polled faster than every 2 s.  Reads inside that
//! window return the previous transaction's result, failures included.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-banged through `hw_init` GPIO and µs-timer helpers,
//! with the 40-bit receive inside an interrupt-free section.
//! On host/test: returns a raw frame injected with `sim_set_frame` /
//! `sim_set_climate`, still routed through [`decode_frame`].

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU64, Ordering};

use crate::app::model::ClimateReading;
use crate::drivers::hw_init;
use crate::error::SensorError;

/// Minimum spacing between two bus transactions.
pub const MIN_SAMPLE_INTERVAL_US: u64 = 2_000_000;

#[cfg(target_os = "espidf")]
const START_LOW_US: u32 = 1_100;
#[cfg(target_os = "espidf")]
const RELEASE_US: u32 = 40;
#[cfg(target_os = "espidf")]
const PREAMBLE_TIMEOUT_US: u64 = 100;
#[cfg(target_os = "espidf")]
const BIT_TIMEOUT_US: u64 = 100;
/// High pulses longer than this carry a `1`.
#[cfg(target_os = "espidf")]
const BIT_THRESHOLD_US: u64 = 40;

const HUMIDITY_MAX_PCT: f32 = 100.0;
const TEMP_MIN_C: f32 = -40.0;
const TEMP_MAX_C: f32 = 80.0;

/// Decode and validate one 5-byte frame.
pub fn decode_frame(frame: [u8; 5]) -> Result<ClimateReading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity = f32::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;
    let magnitude = f32::from(u16::from_be_bytes([frame[2] & 0x7F, frame[3]])) / 10.0;
    let temperature = if frame[2] & 0x80 != 0 { -magnitude } else { magnitude };

    if !(0.0..=HUMIDITY_MAX_PCT).contains(&humidity)
        || !(TEMP_MIN_C..=TEMP_MAX_C).contains(&temperature)
    {
        return Err(SensorError::OutOfRange);
    }
    ClimateReading::new(temperature, humidity)
}

pub struct Dht22 {
    gpio: i32,
    last: Option<(u64, Result<ClimateReading, SensorError>)>,
}

impl Dht22 {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, last: None }
    }

    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        self.read_at(hw_init::uptime_us())
    }

    /// Read with an explicit timestamp (µs since boot).
    pub fn read_at(&mut self, now_us: u64) -> Result<ClimateReading, SensorError> {
        if let Some((taken_at, result)) = self.last {
            if now_us.saturating_sub(taken_at) < MIN_SAMPLE_INTERVAL_US {
                return result;
            }
        }
        let result = self.transact().and_then(decode_frame);
        self.last = Some((now_us, result));
        result
    }

    #[cfg(target_os = "espidf")]
    fn transact(&self) -> Result<[u8; 5], SensorError> {
        hw_init::gpio_write(self.gpio, false);
        hw_init::delay_us(START_LOW_US);
        // About 5 ms with interrupts masked on this core.  WiFi ISRs
        // landing mid-frame stretch pulses into checksum failures.
        esp_idf_svc::hal::interrupt::free(|| self.receive())
    }

    #[cfg(target_os = "espidf")]
    fn receive(&self) -> Result<[u8; 5], SensorError> {
        hw_init::gpio_write(self.gpio, true);
        hw_init::delay_us(RELEASE_US);

        self.pulse_us(false, PREAMBLE_TIMEOUT_US)?;
        self.pulse_us(true, PREAMBLE_TIMEOUT_US)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.pulse_us(false, BIT_TIMEOUT_US)?;
            let high = self.pulse_us(true, BIT_TIMEOUT_US)?;
            if high > BIT_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Length of the pulse currently at `level`, bounded by `timeout_us`.
    #[cfg(target_os = "espidf")]
    fn pulse_us(&self, level: bool, timeout_us: u64) -> Result<u64, SensorError> {
        let start = hw_init::uptime_us();
        while hw_init::gpio_read(self.gpio) == level {
            if hw_init::uptime_us() - start > timeout_us {
                return Err(SensorError::Timeout);
            }
        }
        Ok(hw_init::uptime_us() - start)
    }

    #[cfg(not(target_os = "espidf"))]
    fn transact(&self) -> Result<[u8; 5], SensorError> {
        let packed = SIM_FRAME.load(Ordering::Relaxed);
        if packed & SIM_PRESENT == 0 {
            return Err(SensorError::Timeout);
        }
        let b = packed.to_be_bytes();
        Ok([b[3], b[4], b[5], b[6], b[7]])
    }
}

// ── Simulation state ──────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
const SIM_PRESENT: u64 = 1 << 40;

/// 24.0 °C, 50.0 %.
#[cfg(not(target_os = "espidf"))]
static SIM_FRAME: AtomicU64 = AtomicU64::new(SIM_PRESENT | 0x01_F4_00_F0_E5);

/// Make the next bus transaction return `frame` verbatim.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_frame(frame: [u8; 5]) {
    let mut bytes = [0u8; 8];
    bytes[3..].copy_from_slice(&frame);
    SIM_FRAME.store(SIM_PRESENT | u64::from_be_bytes(bytes), Ordering::Relaxed);
}

/// Encode a valid frame for the given climate values.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    let [h0, h1] = ((humidity_pct * 10.0).round() as u16).to_be_bytes();
    let [t0, t1] = (((temperature_c.abs() * 10.0).round() as u16) & 0x7FFF).to_be_bytes();
    let t0 = if temperature_c < 0.0 { t0 | 0x80 } else { t0 };
    let sum = h0.wrapping_add(h1).wrapping_add(t0).wrapping_add(t1);
    sim_set_frame([h0, h1, t0, t1, sum]);
}

/// Sensor stops answering: every transaction times out.
#[cfg(not(target_os = "espidf"))]
pub fn sim_disconnect() {
    SIM_FRAME.store(0, Ordering::Relaxed);
}
