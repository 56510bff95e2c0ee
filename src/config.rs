//! System configuration parameters
//!
//! All tunable parameters for the SmartRoom controller.  Values are fixed at
//! build time: credentials can be overridden through `SMARTROOM_*`
//! environment variables when compiling, everything else uses the defaults
//! below.  There is no runtime reconfiguration.

use serde::{Deserialize, Serialize};

use crate::app::policy::DEFAULT_LIGHT_THRESHOLD;
use crate::app::ports::SessionIdentity;
use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- WiFi ---
    /// Station SSID (1-32 printable ASCII bytes)
    pub wifi_ssid: heapless::String<32>,
    /// WPA2 passphrase; empty for an open network
    pub wifi_password: heapless::String<64>,

    // --- MQTT ---
    /// Broker host name
    pub mqtt_host: heapless::String<64>,
    /// Broker TCP port
    pub mqtt_port: u16,
    /// MQTT client identifier
    pub client_id: heapless::String<32>,
    /// Device access token, sent as the MQTT username
    pub access_token: heapless::String<64>,
    /// Topic every telemetry record is published on
    pub telemetry_topic: heapless::String<64>,

    // --- Control ---
    /// Raw LDR reading below which the room counts as dark (0-4095)
    pub light_threshold: u16,

    // --- Timing ---
    /// Delay between completed cycles (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Delay after a failed temperature/humidity read (milliseconds)
    pub sensor_retry_delay_ms: u32,
    /// Delay between MQTT connect attempts (milliseconds)
    pub mqtt_reconnect_delay_ms: u32,
    /// Delay between WiFi association attempts at boot (milliseconds)
    pub wifi_retry_delay_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // WiFi
            wifi_ssid: fixed_str(option_env!("SMARTROOM_WIFI_SSID").unwrap_or("Wokwi-GUEST")),
            wifi_password: fixed_str(option_env!("SMARTROOM_WIFI_PASS").unwrap_or("")),

            // MQTT
            mqtt_host: fixed_str(option_env!("SMARTROOM_MQTT_HOST").unwrap_or("demo.thingsboard.io")),
            mqtt_port: 1883,
            client_id: fixed_str("ESP32_SmartRoom"),
            access_token: fixed_str(option_env!("SMARTROOM_ACCESS_TOKEN").unwrap_or("")),
            telemetry_topic: fixed_str("v1/devices/me/telemetry"),

            // Control
            light_threshold: DEFAULT_LIGHT_THRESHOLD,

            // Timing
            control_loop_interval_ms: 1000, // 1 Hz
            sensor_retry_delay_ms: 1000,
            mqtt_reconnect_delay_ms: 5000,
            wifi_retry_delay_ms: 500,
        }
    }
}

impl SystemConfig {
    /// Range- and format-check every field.
    ///
    /// Called once at boot; an invalid configuration stops startup rather
    /// than running the loop with a broker identity that can never connect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wifi_ssid.is_empty() || !is_printable_ascii(&self.wifi_ssid) {
            return Err(ConfigError::ValidationFailed(
                "wifi_ssid must be 1-32 printable ASCII bytes",
            ));
        }
        if !self.wifi_password.is_empty() && self.wifi_password.len() < 8 {
            return Err(ConfigError::ValidationFailed(
                "wifi_password must be empty (open) or 8-64 bytes",
            ));
        }
        if self.mqtt_host.is_empty() {
            return Err(ConfigError::ValidationFailed("mqtt_host must not be empty"));
        }
        if self.mqtt_port == 0 {
            return Err(ConfigError::ValidationFailed("mqtt_port must be non-zero"));
        }
        if self.client_id.is_empty() || !is_printable_ascii(&self.client_id) {
            return Err(ConfigError::ValidationFailed(
                "client_id must be non-empty printable ASCII",
            ));
        }
        if self.access_token.is_empty() || !is_printable_ascii(&self.access_token) {
            return Err(ConfigError::ValidationFailed(
                "access_token must be set (SMARTROOM_ACCESS_TOKEN)",
            ));
        }
        if self.telemetry_topic.is_empty()
            || self.telemetry_topic.contains(['+', '#'])
        {
            return Err(ConfigError::ValidationFailed(
                "telemetry_topic must be a non-empty topic without wildcards",
            ));
        }
        if self.light_threshold > 4095 {
            return Err(ConfigError::ValidationFailed(
                "light_threshold must fit the 12-bit ADC range",
            ));
        }
        if self.control_loop_interval_ms == 0
            || self.sensor_retry_delay_ms == 0
            || self.mqtt_reconnect_delay_ms == 0
            || self.wifi_retry_delay_ms == 0
        {
            return Err(ConfigError::ValidationFailed("delays must be non-zero"));
        }
        Ok(())
    }

    /// Identity presented to the broker on every connect attempt.
    pub fn session_identity(&self) -> SessionIdentity<'_> {
        SessionIdentity {
            client_id: &self.client_id,
            access_token: &self.access_token,
        }
    }
}

/// Copy `s` into a fixed-capacity string, truncating at capacity.
pub fn fixed_str<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Returns `true` if every byte of `s` is in the printable ASCII range
/// `0x20..=0x7E`.
fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}
