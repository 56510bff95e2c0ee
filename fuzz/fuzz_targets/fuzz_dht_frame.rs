//! Fuzz target: `decode_frame`
//!
//! Feeds arbitrary 5-byte frames into the DHT22 decoder and asserts that
//! it never panics and that every accepted frame carries a valid checksum
//! and in-range values.
//!
//! cargo fuzz run fuzz_dht_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartroom::sensors::dht22::decode_frame;

fuzz_target!(|frame: [u8; 5]| {
    if let Ok(r) = decode_frame(frame) {
        let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        assert_eq!(sum, frame[4], "accepted a frame with a bad checksum");
        assert!((0.0..=100.0).contains(&r.humidity_pct()));
        assert!((-40.0..=80.0).contains(&r.temperature_c()));
    }
});
