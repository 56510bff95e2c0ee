//! Runtime WiFi loss against the simulated radio and broker.
//!
//! The only tests in this binary that touch the adapter simulations, so
//! they run as a single sequential scenario.

use embedded_hal::delay::DelayNs;

use smartroom::adapters::mqtt::MqttAdapter;
use smartroom::adapters::wifi::{WifiAdapter, sim_set_ap_reachable};
use smartroom::app::events::AppEvent;
use smartroom::app::ports::{NetworkPort, TransportPort};
use smartroom::app::service::{ControlLoop, CycleOutcome};
use smartroom::error::CommsError;

use crate::mock_hw::{Journal, MockHardware, RecordingSink, test_config};

/// The access point comes back during any sleep.
struct ApReturnsDuringDelay;

impl DelayNs for ApReturnsDuringDelay {
    fn delay_ns(&mut self, _ns: u32) {
        sim_set_ap_reachable(true);
    }
}

#[test]
fn session_reopens_once_the_access_point_returns() {
    let mut wifi = WifiAdapter::new("Wokwi-GUEST");
    let transport = MqttAdapter::new("broker.local", 1883).with_link(wifi.link());
    let mut hw = MockHardware::new(Journal::new());
    hw.set_room(true, 200);
    let mut control = ControlLoop::new(
        test_config(),
        hw,
        transport,
        ApReturnsDuringDelay,
    );
    let mut sink = RecordingSink::new();

    control.start(&mut wifi, &mut sink);
    assert!(wifi.is_associated());
    assert!(matches!(control.run_cycle(&mut sink), CycleOutcome::Published(_)));

    // AP disappears after boot: link and session both go.
    sim_set_ap_reachable(false);
    assert!(!wifi.is_associated());
    assert!(!control.transport().is_connected());
    let config = test_config();
    assert_eq!(
        control.transport_mut().connect(&config.session_identity()),
        Err(CommsError::LinkDown)
    );

    sink.events.clear();
    let outcome = control.run_cycle(&mut sink);

    assert!(matches!(outcome, CycleOutcome::Published(_)));
    assert!(wifi.is_associated());
    assert!(control.transport().is_connected());
    assert_eq!(control.transport().published().len(), 2);
    assert!(sink.events.contains(&AppEvent::TransportLost));
    assert!(sink.events.contains(&AppEvent::ConnectAttemptFailed {
        attempt: 1,
        error: CommsError::LinkDown,
    }));
    assert!(sink
        .events
        .contains(&AppEvent::TransportConnected { attempts: 2 }));
    // Boot plus the one reconnect.
    assert_eq!(control.stats().reconnects, 2);
}
