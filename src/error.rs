//! Error types for the SmartRoom firmware.
//!
//! Every variant is `Copy` so errors can be carried inside events and cycle
//! outcomes without allocation.  None of them is fatal inside the control
//! loop: each one maps to a local retry policy.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Failure of the combined temperature/humidity read.
///
/// Motion and light reads are infallible at the port boundary, so this is
/// the only sensor error the control loop ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer, or a bit took too long on the wire.
    Timeout,
    /// The 40-bit frame arrived but its checksum byte did not match.
    ChecksumMismatch,
    /// Decoded value is outside the physically plausible range.
    OutOfRange,
    /// Decoded value is NaN or infinite.
    NotANumber,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "sensor timeout"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::OutOfRange => write!(f, "reading out of range"),
            Self::NotANumber => write!(f, "reading is not a number"),
        }
    }
}

impl core::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    /// WiFi station could not associate / obtain an address.
    WifiAssociationFailed,
    /// The station lost its access point and has not rejoined yet.
    LinkDown,
    /// MQTT CONNECT was refused or timed out.  Carries the client return code.
    MqttConnectFailed(i32),
    /// An operation needed a live session and there was none.
    NotConnected,
    /// The broker client rejected the outgoing PUBLISH.
    PublishFailed,
    /// The telemetry record could not be serialised.
    PayloadEncoding,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WifiAssociationFailed => write!(f, "WiFi association failed"),
            Self::LinkDown => write!(f, "WiFi link down"),
            Self::MqttConnectFailed(rc) => write!(f, "MQTT connect failed, rc={}", rc),
            Self::NotConnected => write!(f, "transport not connected"),
            Self::PublishFailed => write!(f, "MQTT publish failed"),
            Self::PayloadEncoding => write!(f, "telemetry encoding failed"),
        }
    }
}

impl core::error::Error for CommsError {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range or format validation.
    /// The `&'static str` names the field and the rule.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}
