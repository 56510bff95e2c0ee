//! WiFi station-mode adapter.
//!
//! Implements [`NetworkPort`], the hexagonal boundary for link-layer
//! association.  One call to [`NetworkPort::associate`] is one attempt;
//! the control loop owns the retry policy.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.
//!
//! Open networks (empty password) associate without authentication;
//! anything else uses WPA2-Personal.
//!
//! ## Link maintenance
//!
//! After the first successful association the adapter keeps the link up
//! on its own: a lost access point is rejoined by the driver, with no
//! call from the control loop.  [`LinkStatus`] is a cloneable view of the
//! link that other adapters poll to fail fast while it is down.

use core::net::Ipv4Addr;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};

use crate::app::ports::NetworkPort;
use crate::error::CommsError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::{
    eventloop::{EspSubscription, EspSystemEventLoop, System},
    hal::modem::Modem,
    nvs::EspDefaultNvsPartition,
    sys::{ESP_OK, EspError, esp_wifi_connect},
    wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi, WifiEvent},
};

// ───────────────────────────────────────────────────────────────
// Link status
// ───────────────────────────────────────────────────────────────

/// Shared, read-only view of whether the station holds its access point.
#[derive(Debug, Clone, Default)]
pub struct LinkStatus(Arc<AtomicBool>);

impl LinkStatus {
    fn set(&self, up: bool) {
        self.0.store(up, Ordering::Release);
    }

    #[cfg(target_os = "espidf")]
    pub fn is_up(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// The simulated driver rejoins as soon as the AP is reachable again.
    #[cfg(not(target_os = "espidf"))]
    pub fn is_up(&self) -> bool {
        self.0.load(Ordering::Acquire) && SIM_AP_REACHABLE.load(Ordering::Relaxed)
    }
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter (ESP-IDF)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct WifiAdapter {
    wifi: BlockingWifi<EspWifi<'static>>,
    link: LinkStatus,
    /// Armed once the first association succeeds.
    rejoin: Arc<AtomicBool>,
    _events: EspSubscription<'static, System>,
}

#[cfg(target_os = "espidf")]
impl WifiAdapter {
    /// Bring up the driver and load station credentials.  Does not
    /// associate.
    pub fn new(
        modem: Modem,
        sys_loop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
        ssid: &str,
        password: &str,
    ) -> Result<Self, EspError> {
        let link = LinkStatus::default();
        let rejoin = Arc::new(AtomicBool::new(false));
        let events = {
            let link = link.clone();
            let rejoin = Arc::clone(&rejoin);
            sys_loop.subscribe::<WifiEvent, _>(move |event| match event {
                WifiEvent::StaConnected(_) => link.set(true),
                WifiEvent::StaDisconnected(_) => {
                    link.set(false);
                    if rejoin.load(Ordering::Acquire) {
                        warn!("WiFi: connection lost, rejoining");
                        // SAFETY: the driver is started; this only queues a join.
                        let rc = unsafe { esp_wifi_connect() };
                        if rc != ESP_OK as i32 {
                            warn!("WiFi: rejoin request failed (rc={})", rc);
                        }
                    }
                }
                _ => {}
            })?
        };

        let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sys_loop.clone(), nvs)?, sys_loop)?;

        let auth_method = if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        // Lengths were checked by SystemConfig::validate().
        let mut client = ClientConfiguration {
            auth_method,
            ..Default::default()
        };
        let _ = client.ssid.push_str(ssid);
        let _ = client.password.push_str(password);
        wifi.set_configuration(&Configuration::Client(client))?;

        wifi.start()?;
        info!("WiFi: driver started (auth={:?})", auth_method);
        Ok(Self {
            wifi,
            link,
            rejoin,
            _events: events,
        })
    }

    pub fn link(&self) -> LinkStatus {
        self.link.clone()
    }
}

#[cfg(target_os = "espidf")]
impl NetworkPort for WifiAdapter {
    fn associate(&mut self) -> Result<(), CommsError> {
        self.rejoin.store(false, Ordering::Release);
        let result = self.wifi.connect().and_then(|()| self.wifi.wait_netif_up());
        match result {
            Ok(()) => {
                self.link.set(true);
                self.rejoin.store(true, Ordering::Release);
                Ok(())
            }
            Err(e) => {
                warn!("WiFi: association error ({})", e);
                // Leave the driver idle so the next attempt starts clean.
                let _ = self.wifi.disconnect();
                Err(CommsError::WifiAssociationFailed)
            }
        }
    }

    fn is_associated(&self) -> bool {
        self.link.is_up()
    }

    fn local_ip(&self) -> Option<Ipv4Addr> {
        self.wifi
            .wifi()
            .sta_netif()
            .get_ip_info()
            .ok()
            .map(|info| info.ip)
    }
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter (host simulation)
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_AP_REACHABLE: AtomicBool = AtomicBool::new(true);

/// Simulation: make the access point (un)reachable.  An adapter that was
/// associated before drops its link while the AP is gone and regains it
/// when the AP returns.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ap_reachable(reachable: bool) {
    SIM_AP_REACHABLE.store(reachable, Ordering::Relaxed);
}

/// Address the Wokwi gateway hands out.
#[cfg(not(target_os = "espidf"))]
const SIM_IP: Ipv4Addr = Ipv4Addr::new(10, 10, 0, 2);

#[cfg(not(target_os = "espidf"))]
pub struct WifiAdapter {
    ssid: heapless::String<32>,
    link: LinkStatus,
    attempts: u32,
}

#[cfg(not(target_os = "espidf"))]
impl WifiAdapter {
    pub fn new(ssid: &str) -> Self {
        Self {
            ssid: crate::config::fixed_str(ssid),
            link: LinkStatus::default(),
            attempts: 0,
        }
    }

    pub fn link(&self) -> LinkStatus {
        self.link.clone()
    }

    /// Association attempts made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(not(target_os = "espidf"))]
impl NetworkPort for WifiAdapter {
    fn associate(&mut self) -> Result<(), CommsError> {
        self.attempts += 1;
        if !SIM_AP_REACHABLE.load(Ordering::Relaxed) {
            warn!("WiFi(sim): '{}' not reachable", self.ssid);
            self.link.set(false);
            return Err(CommsError::WifiAssociationFailed);
        }
        info!("WiFi(sim): associated with '{}'", self.ssid);
        self.link.set(true);
        Ok(())
    }

    fn is_associated(&self) -> bool {
        self.link.is_up()
    }

    fn local_ip(&self) -> Option<Ipv4Addr> {
        self.is_associated().then_some(SIM_IP)
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
