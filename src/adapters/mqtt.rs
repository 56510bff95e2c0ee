//! MQTT telemetry transport.
//!
//! Implements [`TransportPort`] over the ESP-IDF MQTT client.  The access
//! token is sent as the MQTT username with no password, which is how the
//! broker authenticates device sessions.  Publishes are QoS 0, not retained.
//!
//! ## Connection tracking
//!
//! The ESP-IDF client runs in its own task.  Its event callback flips an
//! `Arc<AtomicBool>` on `Connected` / `Disconnected`; that flag is the only
//! state shared with the control loop.  Each [`TransportPort::connect`]
//! call builds a fresh client and waits a bounded time for the CONNACK.
//! On timeout the client is dropped, which stops its task.
//!
//! When built [`with_link`](MqttAdapter::with_link), a connect attempt
//! while the WiFi link is down fails at once with
//! [`CommsError::LinkDown`] instead of waiting out the CONNACK timeout.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::mqtt::client::EspMqttClient`.
//! - **all other targets**: an in-memory broker for host-side tests.

use log::{debug, info, warn};

use crate::adapters::wifi::LinkStatus;
use crate::app::ports::{SessionIdentity, TransportPort};
use crate::error::CommsError;

#[cfg(target_os = "espidf")]
use std::sync::Arc;
#[cfg(target_os = "espidf")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::{
    hal::delay::FreeRtos,
    mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS},
};

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

/// Return code for "no CONNACK before the deadline".
pub const RC_CONNECT_TIMEOUT: i32 = -2;

#[cfg(target_os = "espidf")]
const CONNACK_TIMEOUT_MS: u32 = 3_000;
#[cfg(target_os = "espidf")]
const CONNACK_POLL_MS: u32 = 50;

// ───────────────────────────────────────────────────────────────
// MQTT adapter (ESP-IDF)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct MqttAdapter {
    url: String,
    client: Option<EspMqttClient<'static>>,
    connected: Arc<AtomicBool>,
    link: Option<LinkStatus>,
}

#[cfg(target_os = "espidf")]
impl MqttAdapter {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            url: format!("mqtt://{}:{}", host, port),
            client: None,
            connected: Arc::new(AtomicBool::new(false)),
            link: None,
        }
    }

    /// Gate connects on the WiFi link.
    pub fn with_link(mut self, link: LinkStatus) -> Self {
        self.link = Some(link);
        self
    }

    fn link_down(&self) -> bool {
        self.link.as_ref().is_some_and(|l| !l.is_up())
    }

    fn wait_for_connack(&self) -> bool {
        let mut waited = 0;
        while waited < CONNACK_TIMEOUT_MS {
            if self.connected.load(Ordering::Acquire) {
                return true;
            }
            FreeRtos::delay_ms(CONNACK_POLL_MS);
            waited += CONNACK_POLL_MS;
        }
        self.connected.load(Ordering::Acquire)
    }
}

#[cfg(target_os = "espidf")]
impl TransportPort for MqttAdapter {
    fn is_connected(&self) -> bool {
        self.client.is_some() && self.connected.load(Ordering::Acquire) && !self.link_down()
    }

    fn connect(&mut self, identity: &SessionIdentity<'_>) -> Result<(), CommsError> {
        // Start from a clean session every attempt.
        self.client = None;
        self.connected.store(false, Ordering::Release);
        if self.link_down() {
            return Err(CommsError::LinkDown);
        }

        let conf = MqttClientConfiguration {
            client_id: Some(identity.client_id),
            username: Some(identity.access_token),
            password: None,
            ..Default::default()
        };

        let flag = Arc::clone(&self.connected);
        let client = EspMqttClient::new_cb(&self.url, &conf, move |event| match event.payload() {
            EventPayload::Connected(_) => flag.store(true, Ordering::Release),
            EventPayload::Disconnected => flag.store(false, Ordering::Release),
            EventPayload::Error(e) => warn!("MQTT: client error ({})", e),
            _ => {}
        })
        .map_err(|e| CommsError::MqttConnectFailed(e.code()))?;
        self.client = Some(client);

        if self.wait_for_connack() {
            info!("MQTT: session open as '{}'", identity.client_id);
            Ok(())
        } else {
            self.client = None;
            Err(CommsError::MqttConnectFailed(RC_CONNECT_TIMEOUT))
        }
    }

    fn service(&mut self) {
        // Keep-alive runs in the client task.
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        if !self.connected.load(Ordering::Acquire) {
            return Err(CommsError::NotConnected);
        }
        let client = self.client.as_mut().ok_or(CommsError::NotConnected)?;
        let id = client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .map_err(|e| {
                warn!("MQTT: publish error ({})", e);
                CommsError::PublishFailed
            })?;
        debug!("MQTT: published msg {} ({} bytes) to {}", id, payload.len(), topic);
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// MQTT adapter (host simulation)
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_BROKER_UP: AtomicBool = AtomicBool::new(true);

/// Simulation: take the broker up or down.  Going down drops any open
/// session on the next query.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_broker_up(up: bool) {
    SIM_BROKER_UP.store(up, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub struct MqttAdapter {
    url: String,
    session: bool,
    link: Option<LinkStatus>,
    published: Vec<(String, String)>,
}

#[cfg(not(target_os = "espidf"))]
impl MqttAdapter {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            url: format!("mqtt://{}:{}", host, port),
            session: false,
            link: None,
            published: Vec::new(),
        }
    }

    /// Gate connects on the WiFi link.
    pub fn with_link(mut self, link: LinkStatus) -> Self {
        self.link = Some(link);
        self
    }

    fn link_down(&self) -> bool {
        self.link.as_ref().is_some_and(|l| !l.is_up())
    }

    /// Every `(topic, payload)` accepted by the simulated broker.
    pub fn published(&self) -> &[(String, String)] {
        &self.published
    }
}

#[cfg(not(target_os = "espidf"))]
impl TransportPort for MqttAdapter {
    fn is_connected(&self) -> bool {
        self.session && SIM_BROKER_UP.load(Ordering::Relaxed) && !self.link_down()
    }

    fn connect(&mut self, identity: &SessionIdentity<'_>) -> Result<(), CommsError> {
        if self.link_down() {
            self.session = false;
            return Err(CommsError::LinkDown);
        }
        self.session = SIM_BROKER_UP.load(Ordering::Relaxed);
        if !self.session {
            return Err(CommsError::MqttConnectFailed(RC_CONNECT_TIMEOUT));
        }
        info!("MQTT(sim): '{}' connected to {}", identity.client_id, self.url);
        Ok(())
    }

    fn service(&mut self) {
        if self.session && (self.link_down() || !SIM_BROKER_UP.load(Ordering::Relaxed)) {
            warn!("MQTT(sim): broker went away");
            self.session = false;
        }
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        if !self.is_connected() {
            return Err(CommsError::NotConnected);
        }
        let text = core::str::from_utf8(payload).map_err(|_| CommsError::PayloadEncoding)?;
        debug!("MQTT(sim): {} <- {}", topic, text);
        self.published.push((topic.to_owned(), text.to_owned()));
        Ok(())
    }
}
