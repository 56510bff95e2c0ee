//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (sensors, relays, WiFi, MQTT, event sinks) implement
//! these traits.  The [`ControlLoop`](super::service::ControlLoop) consumes
//! them via generics, so the domain core never touches hardware directly
//! and every port can be replaced by a mock in tests.

use core::net::Ipv4Addr;

use super::model::{ActuatorState, ClimateReading};
use crate::error::{CommsError, SensorError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Temperature and humidity.  Both fail together.
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;

    /// PIR output level.  Never fails.
    fn read_motion(&mut self) -> bool;

    /// Raw ambient-light reading (0 – 4095).  Never fails.
    fn read_light_level(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to switch relays.
///
/// Writes are idempotent and immediately visible through the matching
/// getter, which reports the real line level rather than a cached command.
pub trait ActuatorPort {
    fn set_light(&mut self, on: bool);
    fn set_fan(&mut self, on: bool);
    fn set_ac(&mut self, on: bool);

    fn is_light_on(&self) -> bool;
    fn is_fan_on(&self) -> bool;
    fn is_ac_on(&self) -> bool;

    /// Drive all three relays to `state` (light, fan, A/C order).
    fn apply(&mut self, state: ActuatorState) {
        self.set_light(state.light_on);
        self.set_fan(state.fan_on);
        self.set_ac(state.ac_on);
    }

    /// Observe the relays as they are now.
    fn read_back(&self) -> ActuatorState {
        ActuatorState {
            light_on: self.is_light_on(),
            fan_on: self.is_fan_on(),
            ac_on: self.is_ac_on(),
        }
    }

    /// Open every relay.
    fn all_off(&mut self) {
        self.apply(ActuatorState::ALL_OFF);
    }
}

// ───────────────────────────────────────────────────────────────
// Network port (driven adapter: link layer association)
// ───────────────────────────────────────────────────────────────

/// Station-mode network association.  The control loop only associates
/// during startup; keeping the link up afterwards is the adapter's job.
pub trait NetworkPort {
    /// One association attempt: join the AP and wait for an address.
    fn associate(&mut self) -> Result<(), CommsError>;

    fn is_associated(&self) -> bool;

    /// Address assigned by DHCP, once associated.
    fn local_ip(&self) -> Option<Ipv4Addr>;
}

// ───────────────────────────────────────────────────────────────
// Transport port (driven adapter: publish/subscribe session)
// ───────────────────────────────────────────────────────────────

/// Who the device claims to be when opening a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdentity<'a> {
    pub client_id: &'a str,
    /// Access token; the broker authenticates on this alone.
    pub access_token: &'a str,
}

/// Publish/subscribe session used for telemetry.
pub trait TransportPort {
    fn is_connected(&self) -> bool;

    /// One connect attempt.  Retrying is the caller's business.
    fn connect(&mut self, identity: &SessionIdentity<'_>) -> Result<(), CommsError>;

    /// Non-blocking keep-alive and inbound protocol housekeeping.
    fn service(&mut self);

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, a test
/// recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
