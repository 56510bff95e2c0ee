//! Integration tests for the boot sequence: associate, connect, all off.

use std::net::Ipv4Addr;

use smartroom::app::events::AppEvent;
use smartroom::app::model::ActuatorState;
use smartroom::app::service::ControlLoop;

use crate::mock_hw::{
    Call, Journal, MockHardware, MockNetwork, MockTransport, RecordingDelay, RecordingSink,
    test_config,
};

struct Rig {
    control: ControlLoop<MockHardware, MockTransport, RecordingDelay>,
    network: MockNetwork,
    journal: Journal,
    sink: RecordingSink,
}

fn rig() -> Rig {
    let journal = Journal::new();
    Rig {
        control: ControlLoop::new(
            test_config(),
            MockHardware::new(journal.clone()),
            MockTransport::new(journal.clone()),
            RecordingDelay::new(journal.clone()),
        ),
        network: MockNetwork::new(journal.clone()),
        journal,
        sink: RecordingSink::new(),
    }
}

#[test]
fn boot_associates_connects_then_forces_outputs_off() {
    let mut r = rig();
    r.control.hw_mut().preset(ActuatorState {
        light_on: true,
        fan_on: true,
        ac_on: true,
    });

    r.control.start(&mut r.network, &mut r.sink);

    assert_eq!(
        r.journal.calls(),
        vec![
            Call::Associate,
            Call::Connect,
            Call::SetLight(false),
            Call::SetFan(false),
            Call::SetAc(false),
        ]
    );
    assert_eq!(r.control.hw().state(), ActuatorState::ALL_OFF);
    assert_eq!(
        r.sink.events.last(),
        Some(&AppEvent::Started(ActuatorState::ALL_OFF))
    );
}

#[test]
fn association_is_retried_at_wifi_interval() {
    let mut r = rig();
    r.network.failing_attempts = 2;

    r.control.start(&mut r.network, &mut r.sink);

    let calls = r.journal.calls();
    assert_eq!(
        &calls[..5],
        &[
            Call::Associate,
            Call::Delay(500),
            Call::Associate,
            Call::Delay(500),
            Call::Associate,
        ]
    );
    assert_eq!(
        r.sink.events[0],
        AppEvent::NetworkAssociated {
            attempts: 3,
            ip: Some(Ipv4Addr::new(10, 10, 0, 2)),
        }
    );
}

#[test]
fn transport_is_connected_before_started() {
    let mut r = rig();
    r.control.transport_mut().failing_connects = 1;

    r.control.start(&mut r.network, &mut r.sink);

    assert_eq!(r.journal.delays(), vec![5000]);
    let connected = r
        .sink
        .events
        .iter()
        .position(|e| *e == AppEvent::TransportConnected { attempts: 2 })
        .unwrap();
    let started = r
        .sink
        .events
        .iter()
        .position(|e| matches!(e, AppEvent::Started(_)))
        .unwrap();
    assert!(connected < started);
    assert_eq!(r.control.stats().reconnects, 1);
}

#[test]
fn first_connect_at_boot_is_not_reported_as_a_loss() {
    let mut r = rig();
    r.control.transport_mut().failing_connects = 2;

    r.control.start(&mut r.network, &mut r.sink);

    assert!(!r.sink.events.contains(&AppEvent::TransportLost));
    assert!(r
        .sink
        .events
        .contains(&AppEvent::TransportConnected { attempts: 3 }));
}

#[test]
fn boot_reads_no_sensors_and_publishes_nothing() {
    let mut r = rig();

    r.control.start(&mut r.network, &mut r.sink);

    assert_eq!(r.journal.count(Call::is_sensor_read), 0);
    assert_eq!(r.journal.count(Call::is_publish), 0);
}

#[test]
fn first_cycle_after_boot_runs_without_reconnecting() {
    let mut r = rig();
    r.control.start(&mut r.network, &mut r.sink);
    r.journal.clear();
    r.control.hw_mut().set_room(true, 200);

    r.control.run_cycle(&mut r.sink);

    assert_eq!(r.journal.count(|c| *c == Call::Connect), 0);
    assert_eq!(r.journal.count(Call::is_publish), 1);
}
