//! Fixed-interval, unbounded retry.
//!
//! Both blocking waits in the firmware (WiFi association at boot, MQTT
//! reconnect in the loop) use this policy: try, sleep a constant interval
//! on failure, try again, forever.  There is no backoff and no attempt cap.
//!
//! Time only passes through the injected [`DelayNs`], so tests drive the
//! policy with a recording delay and never actually sleep.

use embedded_hal::delay::DelayNs;

/// Constant delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    interval_ms: u32,
}

/// Result of a retry loop that eventually succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryOutcome<T> {
    pub value: T,
    /// 1-based count of attempts, including the successful one.
    pub attempts: u32,
}

impl FixedInterval {
    pub const fn from_millis(interval_ms: u32) -> Self {
        Self { interval_ms }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Call `op` until it returns `Ok`, sleeping the interval after every
    /// failure.  `op` receives the 1-based attempt number.
    pub fn retry<T, E, D, F>(&self, delay: &mut D, mut op: F) -> RetryOutcome<T>
    where
        D: DelayNs,
        F: FnMut(u32) -> Result<T, E>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            match op(attempt) {
                Ok(value) => {
                    return RetryOutcome {
                        value,
                        attempts: attempt,
                    };
                }
                Err(_) => delay.delay_ms(self.interval_ms),
            }
        }
    }
}
