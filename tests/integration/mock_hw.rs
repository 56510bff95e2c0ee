//! Mock adapters for integration tests.
//!
//! Every mock appends to one shared [`Journal`], so tests can assert on the
//! full interleaving of sensor reads, relay writes, connects, publishes and
//! sleeps without touching real GPIO, radios or clocks.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use smartroom::app::events::AppEvent;
use smartroom::app::model::{ActuatorState, ClimateReading};
use smartroom::app::ports::{
    ActuatorPort, EventSink, NetworkPort, SensorPort, SessionIdentity, TransportPort,
};
use smartroom::config::{SystemConfig, fixed_str};
use smartroom::error::{CommsError, SensorError};

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ReadClimate,
    ReadMotion,
    ReadLight,
    SetLight(bool),
    SetFan(bool),
    SetAc(bool),
    Associate,
    Connect,
    Service,
    Publish { topic: String, payload: String },
    Delay(u32),
}

impl Call {
    pub fn is_sensor_read(&self) -> bool {
        matches!(self, Call::ReadClimate | Call::ReadMotion | Call::ReadLight)
    }

    pub fn is_actuator_write(&self) -> bool {
        matches!(self, Call::SetLight(_) | Call::SetFan(_) | Call::SetAc(_))
    }

    pub fn is_publish(&self) -> bool {
        matches!(self, Call::Publish { .. })
    }
}

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

#[allow(dead_code)]
impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Publish { payload, .. } => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }
}

// ── Config ────────────────────────────────────────────────────

/// Defaults plus an access token, so `validate()` passes.
pub fn test_config() -> SystemConfig {
    let mut cfg = SystemConfig::default();
    cfg.access_token = fixed_str("TEST_TOKEN");
    cfg
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    journal: Journal,
    climate_script: VecDeque<Result<ClimateReading, SensorError>>,
    pub motion: bool,
    pub light_level: u16,
    light_on: bool,
    fan_on: bool,
    ac_on: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            climate_script: VecDeque::new(),
            motion: false,
            light_level: 0,
            light_on: false,
            fan_on: false,
            ac_on: false,
        }
    }

    /// Queue the result of an upcoming climate read.  Once the queue is
    /// empty, reads return 24.5 °C / 52 %.
    pub fn queue_climate(&mut self, result: Result<ClimateReading, SensorError>) {
        self.climate_script.push_back(result);
    }

    pub fn set_room(&mut self, motion: bool, light_level: u16) {
        self.motion = motion;
        self.light_level = light_level;
    }

    /// Force relay state without going through the port (and the journal).
    pub fn preset(&mut self, state: ActuatorState) {
        self.light_on = state.light_on;
        self.fan_on = state.fan_on;
        self.ac_on = state.ac_on;
    }

    pub fn state(&self) -> ActuatorState {
        self.read_back()
    }
}

impl SensorPort for MockHardware {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.journal.push(Call::ReadClimate);
        self.climate_script
            .pop_front()
            .unwrap_or_else(|| ClimateReading::new(24.5, 52.0))
    }

    fn read_motion(&mut self) -> bool {
        self.journal.push(Call::ReadMotion);
        self.motion
    }

    fn read_light_level(&mut self) -> u16 {
        self.journal.push(Call::ReadLight);
        self.light_level
    }
}

impl ActuatorPort for MockHardware {
    fn set_light(&mut self, on: bool) {
        self.journal.push(Call::SetLight(on));
        self.light_on = on;
    }

    fn set_fan(&mut self, on: bool) {
        self.journal.push(Call::SetFan(on));
        self.fan_on = on;
    }

    fn set_ac(&mut self, on: bool) {
        self.journal.push(Call::SetAc(on));
        self.ac_on = on;
    }

    fn is_light_on(&self) -> bool {
        self.light_on
    }

    fn is_fan_on(&self) -> bool {
        self.fan_on
    }

    fn is_ac_on(&self) -> bool {
        self.ac_on
    }
}

// ── MockTransport ─────────────────────────────────────────────

pub struct MockTransport {
    journal: Journal,
    pub connected: bool,
    /// Connect attempts that fail before one succeeds.
    pub failing_connects: u32,
    pub fail_publish: bool,
    pub identities: Vec<(String, String)>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            connected: false,
            failing_connects: 0,
            fail_publish: false,
            identities: Vec::new(),
        }
    }

    /// Simulate the broker dropping the session.
    pub fn drop_session(&mut self) {
        self.connected = false;
    }
}

impl TransportPort for MockTransport {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self, identity: &SessionIdentity<'_>) -> Result<(), CommsError> {
        self.journal.push(Call::Connect);
        self.identities.push((
            identity.client_id.to_owned(),
            identity.access_token.to_owned(),
        ));
        if self.failing_connects > 0 {
            self.failing_connects -= 1;
            return Err(CommsError::MqttConnectFailed(-2));
        }
        self.connected = true;
        Ok(())
    }

    fn service(&mut self) {
        self.journal.push(Call::Service);
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        if self.fail_publish {
            return Err(CommsError::PublishFailed);
        }
        self.journal.push(Call::Publish {
            topic: topic.to_owned(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        });
        Ok(())
    }
}

// ── MockNetwork ───────────────────────────────────────────────

pub struct MockNetwork {
    journal: Journal,
    /// Association attempts that fail before one succeeds.
    pub failing_attempts: u32,
    associated: bool,
}

impl MockNetwork {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            failing_attempts: 0,
            associated: false,
        }
    }
}

impl NetworkPort for MockNetwork {
    fn associate(&mut self) -> Result<(), CommsError> {
        self.journal.push(Call::Associate);
        if self.failing_attempts > 0 {
            self.failing_attempts -= 1;
            return Err(CommsError::WifiAssociationFailed);
        }
        self.associated = true;
        Ok(())
    }

    fn is_associated(&self) -> bool {
        self.associated
    }

    fn local_ip(&self) -> Option<Ipv4Addr> {
        self.associated.then_some(Ipv4Addr::new(10, 10, 0, 2))
    }
}

// ── RecordingDelay ────────────────────────────────────────────

pub struct RecordingDelay {
    journal: Journal,
}

impl RecordingDelay {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.journal.push(Call::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.journal.push(Call::Delay(ms));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
