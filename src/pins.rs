//! GPIO / peripheral pin assignments for the SmartRoom board (ESP32-WROOM).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Assignments are fixed; there is no runtime
//! remapping.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT22 single-wire data line (open-drain, external 10 kΩ pull-up).
pub const DHT_GPIO: i32 = 14;

/// HC-SR501 PIR output.  HIGH = motion detected.
pub const PIR_GPIO: i32 = 33;

/// LDR voltage divider.  GPIO 34 is input-only and maps to ADC1 channel 6.
pub const LDR_ADC_GPIO: i32 = 34;
/// ADC1 channel wired to [`LDR_ADC_GPIO`].
pub const LDR_ADC_CHANNEL: u32 = 6;

// ---------------------------------------------------------------------------
// Relays (active HIGH)
// ---------------------------------------------------------------------------

pub const LIGHT_RELAY_GPIO: i32 = 26;
pub const FAN_RELAY_GPIO: i32 = 27;
pub const AC_RELAY_GPIO: i32 = 25;

/// All relay outputs, in the order the policy applies them.
pub const RELAY_GPIOS: [i32; 3] = [LIGHT_RELAY_GPIO, FAN_RELAY_GPIO, AC_RELAY_GPIO];
