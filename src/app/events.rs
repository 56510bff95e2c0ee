//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them.

use core::net::Ipv4Addr;

use super::model::ActuatorState;
use super::telemetry::TelemetryRecord;
use crate::error::{CommsError, SensorError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Network association finished during startup.
    NetworkAssociated {
        attempts: u32,
        ip: Option<Ipv4Addr>,
    },

    /// The transport was found disconnected at the top of a cycle.
    TransportLost,

    /// One connect attempt failed; another follows after the retry delay.
    ConnectAttemptFailed { attempt: u32, error: CommsError },

    /// The transport session is (re-)established.
    TransportConnected { attempts: u32 },

    /// Startup finished; relays are in their boot state.
    Started(ActuatorState),

    /// Temperature/humidity read failed; the cycle was skipped.
    CycleSkipped(SensorError),

    /// A cycle completed and produced this record.
    Telemetry(TelemetryRecord),

    /// The record of this cycle could not be delivered.
    PublishFailed(CommsError),
}
