//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART on the device, stderr in host simulation).  Each
//! telemetry event prints the multi-line status block an operator watches
//! on the serial monitor.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!("===== Sensor Readings =====");
                info!("Temperature: {:.1} \u{00b0}C", t.temperature_c);
                info!("Humidity: {:.1} %", t.humidity_pct);
                info!("PIR: {}", if t.motion_detected { "Motion Detected" } else { "No Motion" });
                info!("LDR Value: {}", t.light_level);
                info!("Light: {}", on_off(t.light_on));
                info!("Fan: {}", on_off(t.fan_on));
                info!("AC: {}", on_off(t.ac_on));
                info!("===========================");
            }
            AppEvent::NetworkAssociated { attempts, ip } => match ip {
                Some(addr) => info!("NET   | associated after {} attempt(s), ip={}", attempts, addr),
                None => info!("NET   | associated after {} attempt(s)", attempts),
            },
            AppEvent::TransportLost => {
                warn!("MQTT  | not connected");
            }
            AppEvent::ConnectAttemptFailed { attempt, error } => {
                warn!("MQTT  | attempt {} failed: {}", attempt, error);
            }
            AppEvent::TransportConnected { attempts } => {
                info!("MQTT  | connected after {} attempt(s)", attempts);
            }
            AppEvent::Started(state) => {
                info!(
                    "START | light={} fan={} ac={}",
                    on_off(state.light_on),
                    on_off(state.fan_on),
                    on_off(state.ac_on),
                );
            }
            AppEvent::CycleSkipped(e) => {
                warn!("SKIP  | {}", e);
            }
            AppEvent::PublishFailed(e) => {
                warn!("SEND  | {}", e);
            }
        }
    }
}
