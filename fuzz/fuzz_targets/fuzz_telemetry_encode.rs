//! Fuzz target: decode → decide → encode
//!
//! Any frame the decoder accepts, combined with any motion/light input,
//! must encode to a JSON object with exactly the seven telemetry keys.
//!
//! cargo fuzz run fuzz_telemetry_encode

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartroom::app::model::SensorReading;
use smartroom::app::policy::decide;
use smartroom::app::telemetry::TelemetryRecord;
use smartroom::sensors::dht22::decode_frame;

fuzz_target!(|input: ([u8; 5], bool, u16)| {
    let (frame, motion, light) = input;
    let Ok(climate) = decode_frame(frame) else {
        return;
    };
    let light = light.min(4095);
    let reading = SensorReading {
        climate,
        motion_detected: motion,
        light_level: light,
    };
    let record = TelemetryRecord::new(&reading, decide(motion, light));
    let json = record.encode().expect("finite reading must encode");
    assert!(json.starts_with("{\"temperature\":"));
    assert!(json.ends_with('}'));
    assert_eq!(json.matches("_state\"").count(), 4);
});
