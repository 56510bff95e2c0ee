//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to               |
//! |------------|----------------|---------------------------|
//! | `hardware` | SensorPort     | DHT22, PIR, LDR (ADC1)    |
//! |            | ActuatorPort   | Relay GPIOs               |
//! | `wifi`     | NetworkPort    | ESP-IDF WiFi STA          |
//! | `mqtt`     | TransportPort  | ESP-IDF MQTT client       |
//! | `log_sink` | EventSink      | Serial log output         |
//! | `delay`    | DelayNs        | FreeRTOS / thread sleep   |

pub mod delay;
pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod wifi;
