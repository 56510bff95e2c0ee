//! SmartRoom Firmware: Main Entry Point
//!
//! Hexagonal architecture around a single blocking control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   WifiAdapter    MqttAdapter    LogEventSink  │
//! │  (Sensor+Actuator) (Network)      (Transport)    (EventSink)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ControlLoop (pure logic)                  │    │
//! │  │  ControlPolicy · FixedInterval retry · Telemetry       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use smartroom::adapters::delay::SystemDelay;
use smartroom::adapters::hardware::HardwareAdapter;
use smartroom::adapters::log_sink::LogEventSink;
use smartroom::adapters::mqtt::MqttAdapter;
use smartroom::adapters::wifi::WifiAdapter;
use smartroom::app::service::ControlLoop;
use smartroom::config::SystemConfig;
use smartroom::drivers::hw_init;

fn main() -> Result<()> {
    // ── 1. Runtime bootstrap ──────────────────────────────────
    init_runtime();

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartRoom v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    config.validate()?;
    info!(
        "Config: broker={}:{} topic={} light_threshold={}",
        config.mqtt_host, config.mqtt_port, config.telemetry_topic, config.light_threshold
    );

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()?;
    let hw = HardwareAdapter::on_board_pins();

    // ── 4. Network + transport adapters ───────────────────────
    let mut network = build_network(&config)?;
    let transport = MqttAdapter::new(&config.mqtt_host, config.mqtt_port).with_link(network.link());
    let mut sink = LogEventSink::new();

    // ── 5. Start and run ──────────────────────────────────────
    let mut control = ControlLoop::new(config, hw, transport, SystemDelay::new());
    control.start(&mut network, &mut sink);

    info!("System ready. Entering control loop.");
    control.run(&mut sink)
}

#[cfg(target_os = "espidf")]
fn init_runtime() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
}

#[cfg(not(target_os = "espidf"))]
fn init_runtime() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Occupied, dim room so the simulation shows every relay switching on.
    hw_init::sim_set_gpio(smartroom::pins::PIR_GPIO, true);
    hw_init::sim_set_adc(smartroom::pins::LDR_ADC_CHANNEL, 320);
}

#[cfg(target_os = "espidf")]
fn load_config() -> SystemConfig {
    SystemConfig::default()
}

#[cfg(not(target_os = "espidf"))]
fn load_config() -> SystemConfig {
    let mut config = SystemConfig::default();
    // The simulated broker does not authenticate.
    if config.access_token.is_empty() {
        log::warn!("No access token set; using a placeholder for simulation");
        config.access_token = smartroom::config::fixed_str("simulation");
    }
    config
}

#[cfg(target_os = "espidf")]
fn build_network(config: &SystemConfig) -> Result<WifiAdapter> {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    Ok(WifiAdapter::new(
        peripherals.modem,
        sys_loop,
        Some(nvs),
        &config.wifi_ssid,
        &config.wifi_password,
    )?)
}

#[cfg(not(target_os = "espidf"))]
fn build_network(config: &SystemConfig) -> Result<WifiAdapter> {
    Ok(WifiAdapter::new(&config.wifi_ssid))
}
