//! Occupancy control policy.
//!
//! A pure mapping from this cycle's motion and light readings to the desired
//! relay states.  Nothing is remembered between calls (no hysteresis, no
//! debouncing), so a flickering PIR output flickers the relays with it.
//!
//! | motion | light level        | light | fan | A/C |
//! |--------|--------------------|-------|-----|-----|
//! | yes    | `< threshold`      | on    | on  | on  |
//! | yes    | `>= threshold`     | off   | on  | on  |
//! | no     | any                | off   | off | off |

use super::model::ActuatorState;

/// LDR reading below which the room is considered dark.
pub const DEFAULT_LIGHT_THRESHOLD: u16 = 500;

/// The decision rule with its darkness threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPolicy {
    light_threshold: u16,
}

impl Default for ControlPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_THRESHOLD)
    }
}

impl ControlPolicy {
    pub fn new(light_threshold: u16) -> Self {
        Self { light_threshold }
    }

    pub fn light_threshold(&self) -> u16 {
        self.light_threshold
    }

    /// Desired relay states for one cycle.
    pub fn decide(&self, motion_detected: bool, light_level: u16) -> ActuatorState {
        if motion_detected {
            ActuatorState {
                light_on: light_level < self.light_threshold,
                fan_on: true,
                ac_on: true,
            }
        } else {
            ActuatorState::ALL_OFF
        }
    }
}

/// [`ControlPolicy::decide`] with [`DEFAULT_LIGHT_THRESHOLD`].
pub fn decide(motion_detected: bool, light_level: u16) -> ActuatorState {
    ControlPolicy::default().decide(motion_detected, light_level)
}
