//! Control loop: the hexagonal core.
//!
//! [`ControlLoop`] owns the device context: the hardware adapter, the
//! transport session, the delay provider, the policy and the retry
//! policies.  Every I/O flows through port traits, so the whole cycle runs
//! against mock adapters in tests without real time passing.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ TransportPort
//!                 │       ControlLoop         │
//! ActuatorPort ◀──│  policy · retry · stats   │ ──▶ EventSink
//!                 └──────────────────────────┘
//! ```
//!
//! One cycle:
//!
//! ```text
//!  Idle ─▶ ensure connected ─▶ service ─▶ read climate ─┬─[err]─▶ Skip ─▶ Idle
//!                                                        │
//!                                                        └─▶ read motion/light
//!                                                            ─▶ decide ─▶ apply
//!                                                            ─▶ read back ─▶ publish ─▶ Idle
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::SystemConfig;
use crate::error::{CommsError, SensorError};

use super::events::AppEvent;
use super::model::SensorReading;
use super::policy::ControlPolicy;
use super::ports::{ActuatorPort, EventSink, NetworkPort, SensorPort, TransportPort};
use super::retry::FixedInterval;
use super::telemetry::TelemetryRecord;

// ───────────────────────────────────────────────────────────────
// Outcomes and counters
// ───────────────────────────────────────────────────────────────

/// How a single cycle ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// Relays applied, record published.
    Published(TelemetryRecord),
    /// Relays applied, but the record could not be delivered.
    PublishFailed(TelemetryRecord, CommsError),
    /// Climate read failed; nothing was read, decided, written or sent.
    Skipped(SensorError),
}

/// Counters since boot.  In memory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    pub cycles: u64,
    pub skipped: u64,
    pub published: u64,
    pub publish_failures: u64,
    /// Successful (re-)connects, including the one at startup.
    pub reconnects: u64,
}

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop<H, T, D> {
    hw: H,
    transport: T,
    delay: D,
    config: SystemConfig,
    policy: ControlPolicy,
    reconnect: FixedInterval,
    association: FixedInterval,
    stats: LoopStats,
}

impl<H, T, D> ControlLoop<H, T, D>
where
    H: SensorPort + ActuatorPort,
    T: TransportPort,
    D: DelayNs,
{
    /// Assemble the loop from its capabilities.  Nothing touches hardware
    /// until [`start`](Self::start).
    pub fn new(config: SystemConfig, hw: H, transport: T, delay: D) -> Self {
        Self {
            policy: ControlPolicy::new(config.light_threshold),
            reconnect: FixedInterval::from_millis(config.mqtt_reconnect_delay_ms),
            association: FixedInterval::from_millis(config.wifi_retry_delay_ms),
            hw,
            transport,
            delay,
            config,
            stats: LoopStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot sequence: associate the network, open the transport session,
    /// force every relay off.  Blocks until the first two succeed.
    pub fn start(&mut self, network: &mut impl NetworkPort, sink: &mut impl EventSink) {
        info!("WiFi: connecting to '{}'", self.config.wifi_ssid);
        let outcome = self.association.retry(&mut self.delay, |attempt| {
            network.associate().inspect_err(|e| {
                warn!("WiFi: attempt {} failed ({})", attempt, e);
            })
        });
        let ip = network.local_ip();
        match ip {
            Some(addr) => info!("WiFi connected, IP address: {}", addr),
            None => info!("WiFi connected"),
        }
        sink.emit(&AppEvent::NetworkAssociated {
            attempts: outcome.attempts,
            ip,
        });

        self.connect_transport(sink);

        self.hw.all_off();
        let state = self.hw.read_back();
        info!("Relays initialised: {:?}", state);
        sink.emit(&AppEvent::Started(state));
    }

    /// Run cycles forever.
    pub fn run(&mut self, sink: &mut impl EventSink) -> ! {
        loop {
            self.run_cycle(sink);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One full cycle: connect → service → sense → decide → actuate → report.
    pub fn run_cycle(&mut self, sink: &mut impl EventSink) -> CycleOutcome {
        self.stats.cycles += 1;

        self.ensure_connected(sink);
        self.transport.service();

        // A failed climate read short-circuits everything else.
        let climate = match self.hw.read_climate() {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to read from DHT sensor: {}", e);
                self.stats.skipped += 1;
                sink.emit(&AppEvent::CycleSkipped(e));
                self.delay.delay_ms(self.config.sensor_retry_delay_ms);
                return CycleOutcome::Skipped(e);
            }
        };

        let reading = SensorReading {
            climate,
            motion_detected: self.hw.read_motion(),
            light_level: self.hw.read_light_level(),
        };

        let desired = self
            .policy
            .decide(reading.motion_detected, reading.light_level);
        self.hw.apply(desired);

        let observed = self.hw.read_back();
        if observed != desired {
            warn!("Relay read-back {:?} differs from command {:?}", observed, desired);
        }

        // Relays are written before the record describing them leaves.
        let record = TelemetryRecord::new(&reading, observed);
        let outcome = match self.publish(&record) {
            Ok(()) => {
                self.stats.published += 1;
                CycleOutcome::Published(record)
            }
            Err(e) => {
                warn!("Telemetry not delivered: {}", e);
                self.stats.publish_failures += 1;
                sink.emit(&AppEvent::PublishFailed(e));
                CycleOutcome::PublishFailed(record, e)
            }
        };
        sink.emit(&AppEvent::Telemetry(record));

        self.delay.delay_ms(self.config.control_loop_interval_ms);
        outcome
    }

    /// Block until the transport is connected, retrying at the fixed
    /// reconnect interval.  Returns immediately when already connected.
    pub fn ensure_connected(&mut self, sink: &mut impl EventSink) {
        if self.transport.is_connected() {
            return;
        }
        sink.emit(&AppEvent::TransportLost);
        self.connect_transport(sink);
    }

    fn connect_transport(&mut self, sink: &mut impl EventSink) {
        let identity = self.config.session_identity();
        let interval_ms = self.reconnect.interval_ms();
        let transport = &mut self.transport;
        let outcome = self.reconnect.retry(&mut self.delay, |attempt| {
            info!("Attempting MQTT connection (attempt {})...", attempt);
            transport.connect(&identity).inspect_err(|e| {
                warn!("failed ({}), try again in {} ms", e, interval_ms);
                sink.emit(&AppEvent::ConnectAttemptFailed { attempt, error: *e });
            })
        });

        info!("MQTT connected after {} attempt(s)", outcome.attempts);
        self.stats.reconnects += 1;
        sink.emit(&AppEvent::TransportConnected {
            attempts: outcome.attempts,
        });
    }

    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), CommsError> {
        let payload = record.encode()?;
        info!("Sending payload: {}", payload);
        self.transport
            .publish(&self.config.telemetry_topic, payload.as_bytes())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn policy(&self) -> ControlPolicy {
        self.policy
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
